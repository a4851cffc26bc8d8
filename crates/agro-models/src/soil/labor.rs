use agro_core::{parse_inputs, preload_outputs, quantize_outputs, set_if_unset, FieldSpec, Model, ModelError,
                ModelInfo, RecordExt, RuntimeContext, TypeSchema, Value, ValueMap};
use rust_decimal::Decimal;

#[derive(Debug, Default)]
pub struct SoilLabor;

impl Model for SoilLabor {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "soil_labor", description: "Labor schedule selector for Soil" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("bedspace", FieldSpec::decimal("Bedspace area that needs to be covered by labor (sqft)"))
            .field("bedspace per laborer",
                   FieldSpec::decimal("Expected bedspace covered by a laborer (sqft)").default_int(10000))
            .field("fringe cost", FieldSpec::decimal("Fringe costs for labor").default_dec("0.1"))
            .field("owner is headgrower",
                   FieldSpec::boolean("Whether owner counts as headgrower").default_bool(true))
            .field("headgrower salary", FieldSpec::decimal("Salary for headgrower ($ / y)").default_int(60000))
            .field("labor wages", FieldSpec::decimal("Salary for operators ($ / h)").default_dec("15.73"))
    }

    fn output_type(&self) -> TypeSchema {
        let element = TypeSchema::new()
            .field("role", FieldSpec::text("Role description").primary_key())
            .field("bedspace per role", FieldSpec::decimal("Amount of bedspace covered by role").digits(0))
            .field("number of staff", FieldSpec::decimal("Number of positions of this type required").digits(2))
            .field("annual cost per role",
                   FieldSpec::decimal("Cost spent per year in each position of this role ($ / staff / y)").digits(2))
            .field("annual cost", FieldSpec::decimal("Total annual cost spent in this role ($ / year)").digits(2));
        TypeSchema::new()
            .field("labor", FieldSpec::list("List of labor positions required", element))
            .field("total staff", FieldSpec::integer("Total staff on labor requirements"))
            .field("total cost", FieldSpec::decimal("Total annual cost on labor requirements ($)").digits(2))
    }

    fn compute(&self, _ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);

        let bedspace = inputs.dec("bedspace");
        let bedspace_per_laborer = inputs.dec("bedspace per laborer");
        let fringe_multiplier = Decimal::ONE + inputs.dec("fringe cost");
        let head_grower_coverage = Decimal::from(10) * bedspace_per_laborer;

        // El dueño que ejerce de head grower no se cuenta como posición extra
        let mut head_growers = (bedspace / head_grower_coverage).floor();
        if !inputs.flag("owner is headgrower") {
            head_growers += Decimal::ONE;
        }

        let roles = [("Head Grower",
                      head_grower_coverage,
                      head_growers,
                      inputs.dec("headgrower salary") * fringe_multiplier),
                     ("Operator / asst",
                      bedspace_per_laborer,
                      bedspace / bedspace_per_laborer,
                      inputs.dec("labor wages") * Decimal::from(40) * Decimal::from(52) * fringe_multiplier)];
        let labor: Vec<Value> = roles.iter()
                                     .map(|(role, coverage, staff, cost_per_role)| {
                                         let mut line = ValueMap::new();
                                         line.insert("role".into(), Value::Text(role.to_string()));
                                         line.insert("bedspace per role".into(), Value::Decimal(*coverage));
                                         line.insert("number of staff".into(), Value::Decimal(*staff));
                                         line.insert("annual cost per role".into(), Value::Decimal(*cost_per_role));
                                         line.insert("annual cost".into(), Value::Decimal(*cost_per_role * *staff));
                                         Value::Record(line)
                                     })
                                     .collect();

        let total_staff = labor.iter()
                               .filter_map(|line| line.as_record())
                               .fold(Decimal::ZERO, |acc, line| acc + line.dec("number of staff"));
        let total_cost = labor.iter()
                              .filter_map(|line| line.as_record())
                              .fold(Decimal::ZERO, |acc, line| acc + line.dec("annual cost"));
        result.insert("labor".into(), Value::List(labor));
        set_if_unset(&mut result, "total staff", Value::Decimal(total_staff));
        set_if_unset(&mut result, "total cost", Value::Decimal(total_cost));

        if quantize {
            quantize_outputs(&output_type, &mut result);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_core::{decimal, InMemoryRowStore};
    use std::sync::Arc;

    #[test]
    fn external_headgrower_adds_one_position() {
        let ctx = RuntimeContext::new(Arc::new(InMemoryRowStore::new()));
        let mut args = ValueMap::new();
        args.insert("bedspace".into(), Value::Int(20000));
        args.insert("owner is headgrower".into(), Value::Bool(false));
        let result = SoilLabor.compute(&ctx, &args, false).unwrap();
        let labor = result.list("labor");
        let head = labor[0].as_record().unwrap();
        assert_eq!(head.dec("number of staff"), Decimal::ONE);
        // 20000 sqft a 10000 por operario
        let ops = labor[1].as_record().unwrap();
        assert_eq!(ops.dec("number of staff"), Decimal::from(2));
        assert_eq!(result.dec("total staff"), decimal::lit("3"));
    }
}
