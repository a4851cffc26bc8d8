use std::time::Instant;

use agro_core::{add_elapsed, merge_sql_runtime, parse_inputs, preload_outputs, quantize_outputs, set_if_unset,
                Database, FieldSpec, Model, ModelError, ModelInfo, RecordExt, Row, RuntimeContext, TypeSchema,
                Value, ValueMap};
use rust_decimal::Decimal;

use crate::financials::{FinancialsEmployees, FinancialsInterest, FinancialsMain, FinancialsPopulationFed};
use crate::soil::{SoilCapexOverview, SoilCrop, SoilCropCharacteristics, SoilLandStatus, SoilOpexOverview,
                  SoilSizingArea, SoilWastage};

const SQL_CROP_CHOICES: &str = "SELECT id, crop_type FROM crops ORDER BY id";
const SQL_SALE_UNIT_CHOICES: &str = "SELECT id, description FROM sale_units ORDER BY id";

#[derive(Debug, Default)]
pub struct SoilDeliverables;

impl Model for SoilDeliverables {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_deliverables", description: "Deliverables for Soil" }
    }

    fn input_type(&self) -> TypeSchema {
        let crops_element = TypeSchema::new()
            .field("id", FieldSpec::choice("Selected crop item").primary_key())
            .field("system fraction", FieldSpec::decimal("Fraction of bedspace allocated to crop"))
            .field("sale unit id", FieldSpec::choice("Selected sale unit for crop item"))
            .field("price per unit", FieldSpec::decimal("Sale price for crop per selected unit"));
        TypeSchema::new()
            .field("latitude", FieldSpec::decimal("Geographical latitude"))
            .field("longitude", FieldSpec::decimal("Geographical longitude"))
            .field("land status", FieldSpec::choice("Selection land status").default_int(1))
            .field("land cost", FieldSpec::decimal("Land cost per area ($ / sqft)"))
            .field("owner is headgrower",
                   FieldSpec::boolean("Whether owner counts as headgrower").default_bool(true))
            .field("headGrowerSalary", FieldSpec::decimal("Salary for headgrower ($ / y)").default_int(60000))
            .field("grower experience", FieldSpec::choice("Level of grower experience").default_int(1))
            .field("site area", FieldSpec::decimal("Total area to be allocated (sqft)"))
            .field("crops", FieldSpec::list("Selection of crops to compute", crops_element))
            .field("organic production",
                   FieldSpec::boolean("Whether the system will use organic production").default_bool(false))
            .field("water cost", FieldSpec::decimal("Water cost ($ / gallon)").default_dec("0.002"))
            .field("labor wages", FieldSpec::decimal("Labor wages ($ / h)").default_dec("15.73"))
            .field("rent cost", FieldSpec::decimal("Rent cost per area ($ / sqft month)").default_int(12))
            .field("tax rate", FieldSpec::decimal("Tax rate (%)").default_dec("0.261"))
            .field("financing option", FieldSpec::choice("How capital expenses are financed").default_int(1))
            .field("interest rate", FieldSpec::decimal("Loan interest rate (% / y)").default_dec("0.08"))
            .field("repayment time", FieldSpec::decimal("Repayment period for loan (y)").default_int(7))
    }

    fn input_values(&self, ctx: &RuntimeContext, field: &str) -> Result<Vec<Row>, ModelError> {
        match field {
            "land status" => ctx.input_values(&SoilLandStatus, "land status"),
            "grower experience" => ctx.input_values(&SoilWastage, "grower experience"),
            "crops.id" => Ok(ctx.store().fetch_all(Database::Models, SQL_CROP_CHOICES, &[])?),
            "crops.sale unit id" => Ok(ctx.store().fetch_all(Database::Models, SQL_SALE_UNIT_CHOICES, &[])?),
            "financing option" => {
                let options: [(i64, &str); 3] = [(1, "Debt"), (2, "Equity"), (3, "Self-funded")];
                Ok(options.iter()
                          .map(|(id, description)| {
                              agro_core::row(&[("id", Value::Int(*id)),
                                               ("description", Value::Text(description.to_string()))])
                          })
                          .collect())
            }
            _ => Err(ModelError::UnknownField(field.to_string())),
        }
    }

    fn output_type(&self) -> TypeSchema {
        let breakout_with_fraction = TypeSchema::new()
            .field("category", FieldSpec::text("Category"))
            .field("total price", FieldSpec::decimal("Total price ($)").digits(2))
            .field("fraction", FieldSpec::decimal("% of total price (%)").digits(4));
        let breakout = TypeSchema::new()
            .field("category", FieldSpec::text("Category"))
            .field("total price", FieldSpec::decimal("Total price ($)").digits(2));
        let crop_yield_element = TypeSchema::new()
            .field("crop type", FieldSpec::text("crop name"))
            .field("yield", FieldSpec::decimal("Yield").digits(0));
        let annual_element = TypeSchema::new()
            .field("year", FieldSpec::integer("Year"))
            .field("wastage", FieldSpec::decimal("Wastage").digits(4))
            .field("total yield", FieldSpec::decimal("Total Yield (lbs)").digits(0))
            .field("crop yield", FieldSpec::list("Yield per each crop", crop_yield_element))
            .field("waste-adjusted revenue", FieldSpec::decimal("Waste-adjusted Revenue ($)").digits(0))
            .field("cogs", FieldSpec::decimal("COGS ($)").digits(0))
            .field("opex", FieldSpec::decimal("Opex ($)").digits(0))
            .field("ebitda", FieldSpec::decimal("EBITDA ($)").digits(0))
            .field("depreciation & amortization", FieldSpec::decimal("Depreciation & Amortization ($)").digits(0))
            .field("interest payment", FieldSpec::decimal("Interest Payment ($)").digits(0))
            .field("taxes", FieldSpec::decimal("Taxes ($)").digits(0))
            .field("net profit", FieldSpec::decimal("Net Profit ($)").digits(0));
        let cash_flow_element = TypeSchema::new()
            .field("year", FieldSpec::integer("Year"))
            .field("net profit", FieldSpec::decimal("Net Profit ($)").digits(2))
            .field("d&a", FieldSpec::decimal("Plus: D&A ($)").digits(2))
            .field("net changes in working capital",
                   FieldSpec::decimal("Plus: Net Changes in Working Capital ($)").digits(2))
            .field("free cash flow", FieldSpec::decimal("Free Cash Flow ($)").digits(2))
            .field("remaining balance", FieldSpec::decimal("Remaining balance ($)").digits(2));
        let financial_summary_element = TypeSchema::new()
            .field("capex", FieldSpec::decimal("Capex").digits(0))
            .field("opex", FieldSpec::decimal("Opex").digits(0))
            .field("cogs", FieldSpec::decimal("COGS").digits(0))
            .field("opex + cogs", FieldSpec::decimal("Opex + COGS").digits(0))
            .field("max annual revenue", FieldSpec::decimal("Max. Annual Revenue").digits(0))
            .field("payback period", FieldSpec::decimal("Payback Period (in years)").digits(2));
        let operating_element = TypeSchema::new()
            .field("year", FieldSpec::integer("Year"))
            .field("wastage", FieldSpec::decimal("Wastage").digits(4))
            .field("waste-adjusted revenue", FieldSpec::decimal("Wastage-adjusted Revenue").digits(0))
            .field("ebitda", FieldSpec::decimal("EBITDA").digits(0))
            .field("ebitda margin", FieldSpec::decimal("EBITDA Margin").digits(4))
            .field("net profit", FieldSpec::decimal("Net Profit").digits(0))
            .field("net margin", FieldSpec::decimal("Net Margin").digits(4));
        TypeSchema::new()
            .field("capex breakout", FieldSpec::list("Capex breakout", breakout_with_fraction.clone()))
            .field("cogs & opex breakout", FieldSpec::list("COGS & Opex breakout", breakout_with_fraction))
            .field("cogs breakout", FieldSpec::list("COGS breakout", breakout.clone()))
            .field("opex breakout", FieldSpec::list("Opex breakout", breakout))
            .field("max total yield", FieldSpec::decimal("Total Yield without Wastage (lbs)").digits(0))
            .field("bedspace", FieldSpec::decimal("Total Bedspace needed (sqft)").digits(0))
            .field("annual summary", FieldSpec::list("Annual summary", annual_element))
            .field("cash flow", FieldSpec::list("Cash flow", cash_flow_element))
            .field("pv of cash flows", FieldSpec::decimal("PV of Cash Flows ($)").digits(2))
            .field("payback period", FieldSpec::decimal("Payback period (y)").digits(2))
            .field("financial summary", FieldSpec::list("Financial summary", financial_summary_element))
            .field("operating summary", FieldSpec::list("10-year operating summary", operating_element))
            .field("number of people employed", FieldSpec::text("Estimated number of people employed"))
            .field("potential population fed", FieldSpec::decimal("Estimated number of people fed").digits(0))
            .field("runtime", FieldSpec::decimal("Time taken for this module run").digits(4).default_int(0))
            .field("sql_runtime",
                   FieldSpec::decimal("Time taken for sql interaction in this module").digits(4).default_int(0))
    }

    fn compute(&self, ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let start = Instant::now();
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);
        result.insert("sql_runtime".into(), Value::Decimal(Decimal::ZERO));

        // Primero, traducir entradas a estado del terreno
        let mut args_land_status = ValueMap::new();
        args_land_status.insert("land status".into(), inputs["land status"].clone());
        let land_status = ctx.invoke(&SoilLandStatus, &args_land_status, true)?;
        result.insert("soil_input_land_status".into(), Value::Record(land_status.clone()));
        merge_sql_runtime(&mut result, &land_status);

        // Dimensionamiento de áreas
        let mut args_sizing = ValueMap::new();
        args_sizing.insert("area".into(), inputs["site area"].clone());
        let sizing = ctx.invoke(&SoilSizingArea, &args_sizing, true)?;
        result.insert("soil_sizing_area".into(), Value::Record(sizing.clone()));
        merge_sql_runtime(&mut result, &sizing);

        // Características de los cultivos
        let mut args_characteristics = ValueMap::new();
        args_characteristics.insert("crops".into(), inputs["crops"].clone());
        let characteristics = ctx.invoke(&SoilCropCharacteristics, &args_characteristics, true)?;
        result.insert("soil_crop_characteristics".into(), Value::Record(characteristics.clone()));
        merge_sql_runtime(&mut result, &characteristics);

        // Matriz de cultivos
        let mut args_crop = ValueMap::new();
        args_crop.insert("latitude".into(), inputs["latitude"].clone());
        args_crop.insert("longitude".into(), inputs["longitude"].clone());
        args_crop.insert("bedspace".into(), sizing["main bedspace"].clone());
        args_crop.insert("crops".into(), inputs["crops"].clone());
        let crop = ctx.invoke(&SoilCrop, &args_crop, true)?;
        result.insert("soil_crop".into(), Value::Record(crop.clone()));
        merge_sql_runtime(&mut result, &crop);

        set_if_unset(&mut result, "max total yield", crop["total yield"].clone());
        set_if_unset(&mut result, "bedspace", sizing["main bedspace"].clone());

        // Proyección de mermas según entradas y cultivos seleccionados
        let mut args_wastage = ValueMap::new();
        args_wastage.insert("grower experience".into(), inputs["grower experience"].clone());
        args_wastage.insert("organic production".into(), inputs["organic production"].clone());
        args_wastage.insert("crop base difficulty".into(), characteristics["combined difficulty factor"].clone());
        args_wastage.insert("number of crops".into(), Value::Int(inputs.list("crops").len() as i64));
        let wastage = ctx.invoke(&SoilWastage, &args_wastage, true)?;
        result.insert("soil_wastage".into(), Value::Record(wastage.clone()));
        merge_sql_runtime(&mut result, &wastage);

        // Gastos de capital
        let mut args_capex = ValueMap::new();
        args_capex.insert("land area".into(), inputs["site area"].clone());
        args_capex.insert("nursery trays".into(),
                          Value::Decimal((crop.dec("total plant sites") / Decimal::from(128)).ceil()));
        let real_estate_cost = if land_status.flag("is buy") {
            inputs.dec("site area") * inputs.dec("land cost")
        } else {
            Decimal::ZERO
        };
        args_capex.insert("real estate cost".into(), Value::Decimal(real_estate_cost));
        let seeding_equipment_cost = if crop.dec("total plant sites") > Decimal::from(4000) {
            Decimal::from(1500)
        } else {
            Decimal::ZERO
        };
        args_capex.insert("seeding equipment cost".into(), Value::Decimal(seeding_equipment_cost));
        let capex = ctx.invoke(&SoilCapexOverview, &args_capex, true)?;
        result.insert("soil_capex_overview".into(), Value::Record(capex.clone()));
        merge_sql_runtime(&mut result, &capex);

        let capex_cost_of = |prefix: &str| -> Result<Value, ModelError> {
            capex.list("line items")
                 .iter()
                 .filter_map(Value::as_record)
                 .find(|line| line.text("description").starts_with(prefix))
                 .map(|line| line["cost"].clone())
                 .ok_or_else(|| ModelError::LookupNotFound(format!("capex line item '{prefix}'")))
        };

        // Gastos operativos
        let mut args_opex = ValueMap::new();
        args_opex.insert("bedspace".into(), sizing["main bedspace"].clone());
        let rent_area = if land_status.flag("is rent") { inputs["site area"].clone() } else { Value::Int(0) };
        args_opex.insert("rent area".into(), rent_area);
        args_opex.insert("annual number of plant sites".into(), crop["total plant sites"].clone());
        args_opex.insert("water used".into(), crop["total water use"].clone());
        args_opex.insert("cold storage capex".into(), capex_cost_of("Cold Storage")?);
        args_opex.insert("tools capex".into(), capex_cost_of("Tools")?);
        args_opex.insert("transportation capex".into(), capex_cost_of("Transportation")?);
        args_opex.insert("harvest capex".into(), capex_cost_of("Harvesting")?);
        args_opex.insert("water cost".into(), inputs["water cost"].clone());
        args_opex.insert("labor wages".into(), inputs["labor wages"].clone());
        args_opex.insert("rent cost".into(), Value::Decimal(Decimal::from(12) * inputs.dec("rent cost")));
        args_opex.insert("owner is headgrower".into(), inputs["owner is headgrower"].clone());
        args_opex.insert("headgrower salary".into(), inputs["headGrowerSalary"].clone());
        args_opex.insert("packaging type".into(), Value::Int(1));
        args_opex.insert("revenue".into(),
                         Value::Decimal(crop.dec("total revenue")
                                        * (Decimal::ONE - wastage.dec("initial wastage"))));
        args_opex.insert("depreciation".into(), capex["total depreciation"].clone());
        let opex = ctx.invoke(&SoilOpexOverview, &args_opex, true)?;
        result.insert("soil_opex_overview".into(), Value::Record(opex.clone()));
        merge_sql_runtime(&mut result, &opex);

        // Calendario de repago de deuda; el monto financiado es 0 si la
        // opción de financiamiento no es deuda
        let mut args_interest = ValueMap::new();
        let financed_amount = if inputs.int("financing option") == 1 {
            capex["total cost"].clone()
        } else {
            Value::Int(0)
        };
        args_interest.insert("amount".into(), financed_amount);
        args_interest.insert("interest rate".into(), inputs["interest rate"].clone());
        args_interest.insert("repayment time".into(), inputs["repayment time"].clone());
        args_interest.insert("payments per year".into(), Value::Int(4));
        let interest = ctx.invoke(&FinancialsInterest, &args_interest, true)?;
        result.insert("financials_interest".into(), Value::Record(interest.clone()));
        merge_sql_runtime(&mut result, &interest);

        // Combinar salidas en el modelo financiero
        let mut args_financials = ValueMap::new();
        args_financials.insert("capex line items".into(), capex["line items"].clone());
        args_financials.insert("opex line items".into(), opex["line items"].clone());
        args_financials.insert("wastage schedule".into(), wastage["wastage schedule"].clone());
        args_financials.insert("crops".into(), crop["crops"].clone());
        args_financials.insert("base yield".into(), crop["total yield"].clone());
        args_financials.insert("base revenue".into(), crop["total revenue"].clone());
        args_financials.insert("depreciation".into(), capex["total depreciation"].clone());
        args_financials.insert("interest repayment schedule".into(), interest["repayment schedule"].clone());
        args_financials.insert("tax rate".into(), inputs["tax rate"].clone());
        let financials = ctx.invoke(&FinancialsMain, &args_financials, true)?;
        result.insert("financials_main".into(), Value::Record(financials.clone()));
        merge_sql_runtime(&mut result, &financials);

        // Número de empleados
        let mut args_employees = ValueMap::new();
        args_employees.insert("total staff".into(), opex["total staff"].clone());
        let employees = ctx.invoke(&FinancialsEmployees, &args_employees, true)?;
        result.insert("financials_employees".into(), Value::Record(employees.clone()));
        merge_sql_runtime(&mut result, &employees);

        // Población alimentada
        let mut args_population = ValueMap::new();
        args_population.insert("total yield".into(), crop["total yield"].clone());
        let population = ctx.invoke(&FinancialsPopulationFed, &args_population, true)?;
        result.insert("financials_population_fed".into(), Value::Record(population.clone()));
        merge_sql_runtime(&mut result, &population);

        // Salidas del modelo financiero
        set_if_unset(&mut result,
                     "number of people employed",
                     employees["number of people employed"].clone());
        set_if_unset(&mut result,
                     "potential population fed",
                     population["potential population fed"].clone());
        set_if_unset(&mut result, "capex breakout", financials["capex breakout"].clone());
        set_if_unset(&mut result, "cogs & opex breakout", financials["cogs & opex breakout"].clone());
        set_if_unset(&mut result, "cogs breakout", financials["cogs breakout"].clone());
        set_if_unset(&mut result, "opex breakout", financials["opex breakout"].clone());
        set_if_unset(&mut result, "annual summary", financials["annual summary"].clone());
        set_if_unset(&mut result, "cash flow", financials["cash flow"].clone());
        set_if_unset(&mut result, "pv of cash flows", financials["pv of cash flows"].clone());
        set_if_unset(&mut result, "payback period", financials["payback period"].clone());
        set_if_unset(&mut result, "financial summary", financials["financial summary"].clone());
        set_if_unset(&mut result, "operating summary", financials["operating summary"].clone());

        add_elapsed(&mut result, "runtime", start);
        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}
