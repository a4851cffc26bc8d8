use agro_core::{decimal, parse_inputs, preload_outputs, quantize_outputs, set_if_unset, Database, FieldSpec,
                Model, ModelError, ModelInfo, RecordExt, RuntimeContext, TypeSchema, Value, ValueMap};
use rust_decimal::Decimal;

const SQL_CAPEX_PRICES: &str = "
    select price_irrigation, price_fertility, price_groundwork, price_nursery
    from soil_capex_lookup
    where max_bedspace is null or max_bedspace > $1
    order by id
    limit 1
";

#[derive(Debug, Default)]
pub struct SoilCapexOverview;

impl Model for SoilCapexOverview {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_capex_overview", description: "Overview of Capex costs for Soil" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("land area", FieldSpec::decimal("Total land area (sqft)"))
            .field("nursery trays", FieldSpec::decimal("Number of trays needed in nursery"))
            .field("real estate cost", FieldSpec::decimal("Cost of real estate ($)"))
            .field("seeding equipment cost", FieldSpec::decimal("Cost of seeding equipment ($)"))
    }

    fn output_type(&self) -> TypeSchema {
        let element = TypeSchema::new()
            .field("description", FieldSpec::text("Line item description"))
            .field("cost", FieldSpec::decimal("Line item expenses cost ($)").digits(2))
            .field("depreciation", FieldSpec::decimal("Depreciation amount per year ($ / y)").digits(2));
        TypeSchema::new()
            .field("line items", FieldSpec::list("Line item costs", element))
            .field("total cost", FieldSpec::decimal("Total operating expenses cost ($)").digits(2))
            .field("total depreciation", FieldSpec::decimal("Total depreciation per year ($ / y)").digits(2))
    }

    fn compute(&self, ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        let land_area = inputs.dec("land area");
        let price_row = ctx.store()
                           .fetch_one(Database::Models, SQL_CAPEX_PRICES, &[Value::Decimal(land_area)])?
                           .ok_or_else(|| {
                               ModelError::LookupNotFound(format!("soil_capex_lookup land_area={land_area}"))
                           })?;

        let eight = Decimal::from(8);
        let cold_storage = land_area * decimal::lit("0.09");
        let tools = land_area * decimal::lit("0.09");
        let harvest = land_area * decimal::lit("0.085");
        let irrigation = price_row.dec("price_irrigation") * land_area;
        let seeding = inputs.dec("seeding equipment cost");
        let lines: [(&str, Decimal, Decimal); 11] =
            [("Cold Storage", cold_storage, cold_storage / eight),
             ("Tools", tools, tools / eight),
             ("Transportation", land_area * decimal::lit("0.12"), Decimal::ZERO),
             ("Irrigation - drip", irrigation, irrigation / eight),
             ("Initial Fertility Upgrade", price_row.dec("price_fertility") * land_area, Decimal::ZERO),
             ("Initial Ground Work - bed shaping", price_row.dec("price_groundwork") * land_area, Decimal::ZERO),
             ("Other Capex - fixed price", Decimal::ZERO, Decimal::ZERO),
             ("Indoor / Covered Nursery with t-5s",
              price_row.dec("price_nursery") * inputs.dec("nursery trays"),
              Decimal::ZERO),
             ("Harvesting, washing & packaging equipment", harvest, harvest / eight),
             ("Seeding Equipment", seeding, seeding / eight),
             ("Real Estate", inputs.dec("real estate cost"), Decimal::ZERO)];

        let line_items: Vec<Value> = lines.iter()
                                          .map(|(description, cost, depreciation)| {
                                              let mut line = ValueMap::new();
                                              line.insert("description".into(),
                                                          Value::Text(description.to_string()));
                                              line.insert("cost".into(), Value::Decimal(*cost));
                                              line.insert("depreciation".into(), Value::Decimal(*depreciation));
                                              Value::Record(line)
                                          })
                                          .collect();

        let total_cost = lines.iter().fold(Decimal::ZERO, |acc, (_, cost, _)| acc + cost);
        let total_depreciation = lines.iter().fold(Decimal::ZERO, |acc, (_, _, dep)| acc + dep);
        result.insert("line items".into(), Value::List(line_items));
        set_if_unset(&mut result, "total cost", Value::Decimal(total_cost));
        set_if_unset(&mut result, "total depreciation", Value::Decimal(total_depreciation));

        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}
