use std::time::Instant;

use agro_core::{add_elapsed, parse_inputs, preload_outputs, quantize_outputs, set_if_unset, FieldSpec, Model,
                ModelError, ModelInfo, RecordExt, RuntimeContext, TypeSchema, Value, ValueMap};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};

#[derive(Debug, Default)]
pub struct FinancialsInterest;

impl Model for FinancialsInterest {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "financials_interest", description: "Interest payment calculations" }
    }

    fn input_type(&self) -> TypeSchema {
        TypeSchema::new()
            .field("amount", FieldSpec::decimal("Initial value of loan ($)"))
            .field("interest rate", FieldSpec::decimal("Interest rate (%)").default_dec("0.08"))
            .field("repayment time", FieldSpec::decimal("Repayment time (years)").default_int(7))
            .field("payments per year", FieldSpec::decimal("Number of payments per year").default_int(4))
    }

    fn output_type(&self) -> TypeSchema {
        let element = TypeSchema::new()
            .field("year", FieldSpec::integer("Year"))
            .field("amount", FieldSpec::decimal("Repayment amount for this year ($)").digits(2));
        TypeSchema::new()
            .field("repayment amount", FieldSpec::decimal("Amount for each repayment ($)").digits(2))
            .field("repayment schedule", FieldSpec::list("Repayment amounts per year", element))
            .field("runtime", FieldSpec::decimal("Time taken for this module run").digits(4).default_int(0))
            .field("sql_runtime",
                   FieldSpec::decimal("Time taken for sql interaction in this module").digits(4).default_int(0))
    }

    fn compute(&self, _ctx: &RuntimeContext, args: &ValueMap, quantize: bool) -> Result<ValueMap, ModelError> {
        let start = Instant::now();
        let inputs = parse_inputs(&self.input_type(), args)?;
        let output_type = self.output_type();
        let mut result = preload_outputs(&output_type, &inputs, args);
        result.insert("sql_runtime".into(), Value::Decimal(Decimal::ZERO));

        let payments_per_year = inputs.dec("payments per year");
        let repayment_time = inputs.dec("repayment time");
        // Tasa por período de pago
        let j = (Decimal::ONE + inputs.dec("interest rate")).powd(Decimal::ONE / payments_per_year) - Decimal::ONE;
        // Número de pagos
        let n = payments_per_year * repayment_time;
        // Deuda inicial
        let d = inputs.dec("amount");
        // Monto por período
        let mut p = if j != Decimal::ZERO {
            j * d * (j + Decimal::ONE).powd(n - Decimal::ONE) / ((j + Decimal::ONE).powd(n) - Decimal::ONE)
        } else {
            d / n
        };
        // Centavos redondeados hacia arriba
        p = (Decimal::ONE_HUNDRED * p).ceil() / Decimal::ONE_HUNDRED;
        set_if_unset(&mut result, "repayment amount", Value::Decimal(p));

        let num_full_years = repayment_time.floor().to_i64().unwrap_or(0);
        let full_year_repayment_amount = p * payments_per_year;
        let partial_year_repayment_amount =
            full_year_repayment_amount * (repayment_time - Decimal::from(num_full_years));
        let mut repayment_schedule: Vec<Value> = Vec::new();
        if d != Decimal::ZERO {
            for year in 1..=num_full_years {
                let mut line = ValueMap::new();
                line.insert("year".into(), Value::Int(year));
                line.insert("amount".into(), Value::Decimal(full_year_repayment_amount));
                repayment_schedule.push(Value::Record(line));
            }
            if partial_year_repayment_amount > Decimal::ZERO {
                let mut line = ValueMap::new();
                line.insert("year".into(), Value::Int(num_full_years + 1));
                line.insert("amount".into(), Value::Decimal(partial_year_repayment_amount));
                repayment_schedule.push(Value::Record(line));
            }
        }
        set_if_unset(&mut result, "repayment schedule", Value::List(repayment_schedule));

        add_elapsed(&mut result, "runtime", start);
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

    fn ctx() -> RuntimeContext {
        RuntimeContext::new(Arc::new(InMemoryRowStore::new()))
    }

    #[test]
    fn zero_amount_produces_empty_schedule() {
        let mut args = ValueMap::new();
        args.insert("amount".into(), Value::Int(0));
        let result = FinancialsInterest.compute(&ctx(), &args, true).unwrap();
        assert!(result.list("repayment schedule").is_empty());
    }

    #[test]
    fn zero_rate_splits_principal_evenly() {
        let mut args = ValueMap::new();
        args.insert("amount".into(), Value::Int(2800));
        args.insert("interest rate".into(), Value::Int(0));
        let result = FinancialsInterest.compute(&ctx(), &args, true).unwrap();
        // 2800 / (4 * 7) = 100 por período, 400 por año
        assert_eq!(result.dec("repayment amount"), decimal::lit("100.00"));
        let schedule = result.list("repayment schedule");
        assert_eq!(schedule.len(), 7);
        assert_eq!(schedule[0].as_record().unwrap().dec("amount"), decimal::lit("400.00"));
    }

    #[test]
    fn fractional_repayment_time_appends_partial_year() {
        let mut args = ValueMap::new();
        args.insert("amount".into(), Value::Int(1000));
        args.insert("interest rate".into(), Value::Int(0));
        args.insert("repayment time".into(), Value::Decimal(decimal::lit("1.5")));
        let result = FinancialsInterest.compute(&ctx(), &args, false).unwrap();
        let schedule = result.list("repayment schedule");
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[1].as_record().unwrap().int("year"), 2);
    }
}
