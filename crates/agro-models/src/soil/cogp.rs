use agro_core::{parse_inputs, preload_outputs, quantize_outputs, set_if_unset, Database, FieldSpec, Model,
                ModelError, ModelInfo, RecordExt, Row, RuntimeContext, TypeSchema, Value, ValueMap};

const SQL_PACKAGING_COST: &str = "SELECT cost FROM packaging WHERE id=$1";
const SQL_PACKAGING_CHOICES: &str = "SELECT id, description FROM packaging";

#[derive(Debug, Default)]
pub struct SoilCogp;

impl Model for SoilCogp {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_cogp", description: "Cost of Goods Produced for Soil" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("plant sites", FieldSpec::decimal("Number of plant sites per year (plant site / y)"))
            .field("packaging type", FieldSpec::choice("Selection for packaging").default_int(2))
            .field("plug cost per site", FieldSpec::decimal("Cost per plug ($ / plant site)").default_dec("0.0071"))
            .field("seed cost per site", FieldSpec::decimal("Cost per seed ($ / plant site)").default_dec("0.005"))
            .field("fertilizer cost per site",
                   FieldSpec::decimal("Cost per fertilizer ($ / plant site)").default_dec("0.01"))
    }

    fn input_values(&self, ctx: &RuntimeContext, field: &str) -> Result<Vec<Row>, ModelError> {
        if field == "packaging type" {
            return Ok(ctx.store().fetch_all(Database::Models, SQL_PACKAGING_CHOICES, &[])?);
        }
        Err(ModelError::UnknownField(field.to_string()))
    }

    fn output_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("total plug cost", FieldSpec::decimal("Total cost for plugs ($ / y)").digits(2))
            .field("total seed cost", FieldSpec::decimal("Total cost for seeds ($ / y)").digits(2))
            .field("total fertilizer cost", FieldSpec::decimal("Total cost for fertilizer ($ / y)").digits(2))
            .field("total packaging cost", FieldSpec::decimal("Total cost per packaging ($ / y)").digits(2))
            .field("total cost per site", FieldSpec::decimal("Total cost per site ($ / y)").digits(2))
            .field("total cost", FieldSpec::decimal("Total cost for COGS ($ / y)").digits(2))
    }

    fn compute(&self, ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        let packaging_type = inputs.int("packaging type");
        let packaging_row = ctx.store()
                               .fetch_one(Database::Models, SQL_PACKAGING_COST, &[Value::Int(packaging_type)])?
                               .ok_or_else(|| ModelError::LookupNotFound(format!("packaging id={packaging_type}")))?;
        let packaging_cost_per_site = packaging_row.dec("cost");

        let plant_sites = inputs.dec("plant sites");
        set_if_unset(&mut result,
                     "total plug cost",
                     Value::Decimal(inputs.dec("plug cost per site") * plant_sites));
        set_if_unset(&mut result,
                     "total seed cost",
                     Value::Decimal(inputs.dec("seed cost per site") * plant_sites));
        set_if_unset(&mut result,
                     "total fertilizer cost",
                     Value::Decimal(inputs.dec("fertilizer cost per site") * plant_sites));
        set_if_unset(&mut result,
                     "total packaging cost",
                     Value::Decimal(packaging_cost_per_site * plant_sites));
        set_if_unset(&mut result,
                     "total cost per site",
                     Value::Decimal(inputs.dec("plug cost per site")
                                    + inputs.dec("seed cost per site")
                                    + inputs.dec("fertilizer cost per site")
                                    + packaging_cost_per_site));
        let total_cost = result.dec("total plug cost")
                         + result.dec("total seed cost")
                         + result.dec("total fertilizer cost")
                         + result.dec("total packaging cost");
        set_if_unset(&mut result,
                     "total cost",
                     Value::Decimal(total_cost));

        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}
