use agro_core::{decimal, parse_inputs, preload_outputs, quantize_outputs, set_if_unset, FieldSpec, Model,
                ModelError, ModelInfo, RecordExt, Row, RuntimeContext, TypeSchema, Value, ValueMap};
use rust_decimal::Decimal;

use crate::soil::{SoilCogp, SoilEnergy, SoilLabor, SoilRent, SoilWater};

#[derive(Debug, Default)]
pub struct SoilOpexOverview;

impl Model for SoilOpexOverview {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_opex_overview", description: "Overview of Opex costs for Soil" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("bedspace", FieldSpec::decimal("Total crop bedspace (sqft)"))
            .field("rent area", FieldSpec::decimal("Total area to be rented (sqft)"))
            .field("annual number of plant sites", FieldSpec::decimal("Annual number of plant sites"))
            .field("seed cost per site", FieldSpec::decimal("Cost per seed ($ / plant site)").default_dec("0.005"))
            .field("water used", FieldSpec::decimal("Amount of water used yearly (gallons / y)"))
            .field("cold storage capex", FieldSpec::decimal("Capex for Cold Storage ($)"))
            .field("tools capex", FieldSpec::decimal("Capex for Tools ($)"))
            .field("transportation capex", FieldSpec::decimal("Capex for Transportation ($)"))
            .field("harvest capex", FieldSpec::decimal("Capex for Harvesting, washing and packaging ($)"))
            .field("water cost", FieldSpec::decimal("Cost of water ($ / gallon)").default_dec("0.002"))
            .field("labor wages", FieldSpec::decimal("Projected labor wages ($ / h)").default_dec("15.73"))
            .field("rent cost", FieldSpec::decimal("Rental cost per area ($ / sqft)").default_int(12))
            .field("owner is headgrower",
                   FieldSpec::boolean("Whether owner counts as headgrower").default_bool(true))
            .field("headgrower salary", FieldSpec::decimal("Salary for headgrower ($ / y)").default_int(60000))
            .field("packaging type", FieldSpec::choice("Selection for packaging").default_int(2))
            .field("revenue", FieldSpec::decimal("Initial value of wastage-corrected revenue ($ / year)"))
            .field("depreciation", FieldSpec::decimal("Total amount depreciated per year ($ / year)"))
    }

    fn input_values(&self, ctx: &RuntimeContext, field: &str) -> Result<Vec<Row>, ModelError> {
        if field == "packaging type" {
            return ctx.input_values(&SoilCogp, "packaging type");
        }
        Err(ModelError::UnknownField(field.to_string()))
    }

    fn output_type(&self) -> TypeSchema {
        let element = TypeSchema::new()
            .field("description", FieldSpec::text("Line item description"))
            .field("cost", FieldSpec::decimal("Line item expenses cost ($)").digits(2))
            .field("cogs cost", FieldSpec::decimal("Cost assign to COGS ($)").digits(2))
            .field("opex cost", FieldSpec::decimal("Cost assigned to opex other than COGS ($)").digits(2));
        TypeSchema::new()
            .field("line items", FieldSpec::list("Line item costs", element))
            .field("total cost", FieldSpec::decimal("Total operating expenses cost ($)").digits(2))
            .field("total cogs cost",
                   FieldSpec::decimal("Total operating expenses cost assign to COGS ($)").digits(2))
            .field("total opex cost",
                   FieldSpec::decimal("Total operating expenses cost other than COGS ($)").digits(2))
            .field("total staff", FieldSpec::decimal("Total staff on labor requirements").digits(2))
    }

    fn compute(&self, ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        let mut args_water = ValueMap::new();
        args_water.insert("water used".into(), inputs["water used"].clone());
        args_water.insert("water cost".into(), inputs["water cost"].clone());
        let water = ctx.invoke(&SoilWater, &args_water, true)?;
        result.insert("soil_water".into(), Value::Record(water.clone()));

        let mut args_rent = ValueMap::new();
        args_rent.insert("rent area".into(), inputs["rent area"].clone());
        args_rent.insert("rent cost".into(), inputs["rent cost"].clone());
        let rent = ctx.invoke(&SoilRent, &args_rent, true)?;
        result.insert("soil_rent".into(), Value::Record(rent.clone()));

        let mut args_labor = ValueMap::new();
        args_labor.insert("bedspace".into(), inputs["bedspace"].clone());
        args_labor.insert("owner is headgrower".into(), inputs["owner is headgrower"].clone());
        args_labor.insert("headgrower salary".into(), inputs["headgrower salary"].clone());
        args_labor.insert("labor wages".into(), inputs["labor wages"].clone());
        let labor = ctx.invoke(&SoilLabor, &args_labor, true)?;
        result.insert("soil_labor".into(), Value::Record(labor.clone()));

        set_if_unset(&mut result, "total staff", labor["total staff"].clone());

        let mut args_cogp = ValueMap::new();
        args_cogp.insert("plant sites".into(), inputs["annual number of plant sites"].clone());
        args_cogp.insert("packaging type".into(), inputs["packaging type"].clone());
        args_cogp.insert("seed cost per site".into(), inputs["seed cost per site"].clone());
        let cogp = ctx.invoke(&SoilCogp, &args_cogp, true)?;
        result.insert("soil_cogp".into(), Value::Record(cogp.clone()));

        let mut args_energy = ValueMap::new();
        args_energy.insert("cold storage capex".into(), inputs["cold storage capex"].clone());
        args_energy.insert("tools capex".into(), inputs["tools capex"].clone());
        args_energy.insert("transportation capex".into(), inputs["transportation capex"].clone());
        args_energy.insert("harvest capex".into(), inputs["harvest capex"].clone());
        let energy = ctx.invoke(&SoilEnergy, &args_energy, true)?;
        result.insert("soil_energy".into(), Value::Record(energy.clone()));

        // (descripción, costo, fracción cogs, fracción opex)
        let lines: [(&str, Decimal, Decimal, Decimal); 9] =
            [("Water", water.dec("total cost"), Decimal::ONE, Decimal::ZERO),
             ("Rent", rent.dec("total rent"), Decimal::ZERO, Decimal::ONE),
             ("Labor", labor.dec("total cost"), decimal::lit("0.8"), decimal::lit("0.2")),
             ("Energy (fuel + electricity)", energy.dec("total cost"), decimal::lit("0.8"), decimal::lit("0.2")),
             ("Consumables", cogp.dec("total cost"), Decimal::ONE, Decimal::ZERO),
             ("Distribution", decimal::lit("0.015") * inputs.dec("revenue"), Decimal::ZERO, Decimal::ONE),
             ("Depreciation", inputs.dec("depreciation"), Decimal::ZERO, Decimal::ZERO),
             ("Other", Decimal::ZERO, Decimal::ZERO, Decimal::ONE),
             ("Admin", decimal::lit("0.05") * labor.dec("total cost"), Decimal::ZERO, Decimal::ONE)];

        let line_items: Vec<Value> = lines.iter()
                                          .map(|(description, cost, cogs_fraction, opex_fraction)| {
                                              let mut line = ValueMap::new();
                                              line.insert("description".into(),
                                                          Value::Text(description.to_string()));
                                              line.insert("cost".into(), Value::Decimal(*cost));
                                              line.insert("cogs cost".into(), Value::Decimal(*cost * *cogs_fraction));
                                              line.insert("opex cost".into(), Value::Decimal(*cost * *opex_fraction));
                                              Value::Record(line)
                                          })
                                          .collect();

        let total_cost = lines.iter().fold(Decimal::ZERO, |acc, (_, cost, _, _)| acc + cost);
        result.insert("line items".into(), Value::List(line_items));
        set_if_unset(&mut result, "total cost", Value::Decimal(total_cost));

        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}
