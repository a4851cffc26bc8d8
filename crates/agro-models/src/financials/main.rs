use std::collections::HashMap;
use std::time::Instant;

use agro_core::{add_elapsed, decimal, parse_inputs, preload_outputs, quantize_outputs, Database, FieldSpec,
                Model, ModelError, ModelInfo, RecordExt, RuntimeContext, TypeSchema, Value, ValueMap};
use rust_decimal::{Decimal, MathematicalOps};

const SQL_SALE_UNITS: &str = "SELECT id, description, multiplier, lb FROM sale_units";

#[derive(Debug, Default)]
pub struct FinancialsMain;

fn record(pairs: Vec<(&str, Value)>) -> Value {
    Value::Record(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

impl Model for FinancialsMain {
    fn info(&self) -> ModelInfo {
        ModelInfo { name: "financials_main", description: "Main financials model" }
    }

    fn input_type(&self) -> TypeSchema {
        let capex_element = TypeSchema::new()
            .field("description", FieldSpec::text("Line item description"))
            .field("cost", FieldSpec::decimal("Line item expenses cost ($)").digits(2));
        let opex_element = TypeSchema::new()
            .field("description", FieldSpec::text("Line item description"))
            .field("cost", FieldSpec::decimal("Line item expenses cost ($)").digits(2))
            .field("cogs cost", FieldSpec::decimal("Cost assign to COGS ($)").digits(2))
            .field("opex cost", FieldSpec::decimal("Cost assigned to opex other than COGS ($)").digits(2));
        let wastage_element = TypeSchema::new()
            .field("year", FieldSpec::integer("Year for projection"))
            .field("wastage", FieldSpec::decimal("Projected wastage for this year (%)").digits(4));
        let lost_element = TypeSchema::new().field("lost", FieldSpec::decimal("Lost factor").digits(2));
        let crops_element = TypeSchema::new()
            .field("crop type", FieldSpec::text("Name of the crop"))
            .field("yield", FieldSpec::decimal("Yield (lb / y)").digits(0))
            .field("lost factors",
                   FieldSpec::list("Factors presenting lost due to first year harvest", lost_element))
            .field("price per unit", FieldSpec::decimal("Price obtained per unit ($ / unit)").digits(2))
            .field("system fraction", FieldSpec::decimal("Fraction of bedspace allocated to crop"))
            .field("sale unit id", FieldSpec::choice("Selected sale unit for crop item"));
        let interest_element = TypeSchema::new()
            .field("year", FieldSpec::integer("Year"))
            .field("amount", FieldSpec::decimal("Repayment amount for this year ($)").digits(2));
        TypeSchema::new()
            .field("capex line items", FieldSpec::list("Line item costs for Capex", capex_element))
            .field("opex line items", FieldSpec::list("Line item costs for Opex", opex_element))
            .field("wastage schedule", FieldSpec::list("Projected wastage for each year", wastage_element))
            .field("crops", FieldSpec::list("Crop matrix results", crops_element))
            .field("base yield", FieldSpec::decimal("Base projected yield per year, before wastage (lb / y)"))
            .field("base revenue", FieldSpec::decimal("Base projected revenue per year, before wastage ($ / y)"))
            .field("depreciation", FieldSpec::decimal("Yearly amount of depreciation ($ / y)"))
            .field("interest repayment schedule",
                   FieldSpec::list("Interest repayment amounts per year", interest_element))
            .field("tax rate", FieldSpec::decimal("Tax rate (%)"))
            .field("discount rate", FieldSpec::decimal("Discount rate for PV of cash flows (%)").default_dec("0.08"))
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
            .field("yield", FieldSpec::decimal("Yield").digits(0))
            .field("even price",
                   FieldSpec::decimal("The price on which seller can make net profit 0 on the market.").digits(2));
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
            .field("annual summary", FieldSpec::list("Annual summary", annual_element))
            .field("cash flow", FieldSpec::list("Cash flow", cash_flow_element))
            .field("pv of cash flows", FieldSpec::decimal("PV of Cash Flows ($)").digits(2))
            .field("payback period", FieldSpec::decimal("Payback period (y)").digits(2))
            .field("financial summary", FieldSpec::list("Financial summary", financial_summary_element))
            .field("operating summary", FieldSpec::list("10-year operating summary", operating_element))
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

        // Resumen de capex
        let capex_lines = inputs.list("capex line items");
        let total_capex = capex_lines.iter()
                                     .filter_map(Value::as_record)
                                     .fold(Decimal::ZERO, |acc, line| acc + line.dec("cost"));
        let mut capex_breakout: Vec<Value> = capex_lines.iter()
                                                        .filter_map(Value::as_record)
                                                        .map(|line| {
                                                            record(vec![("category",
                                                                         Value::Text(line.text("description").into())),
                                                                        ("total price", Value::Decimal(line.dec("cost"))),
                                                                        ("fraction",
                                                                         Value::Decimal(line.dec("cost") / total_capex))])
                                                        })
                                                        .collect();
        capex_breakout.push(record(vec![("category", Value::Text("Total".into())),
                                        ("total price", Value::Decimal(total_capex)),
                                        ("fraction", Value::Int(1))]));
        result.insert("capex breakout".into(), Value::List(capex_breakout));

        // Resumen de cogs & opex
        let opex_lines = inputs.list("opex line items");
        let total_cogs_opex = opex_lines.iter()
                                        .filter_map(Value::as_record)
                                        .fold(Decimal::ZERO, |acc, line| acc + line.dec("cost"));
        let mut cogs_opex_breakout: Vec<Value> =
            opex_lines.iter()
                      .filter_map(Value::as_record)
                      .map(|line| {
                          record(vec![("category", Value::Text(line.text("description").into())),
                                      ("total price", Value::Decimal(line.dec("cost"))),
                                      ("fraction", Value::Decimal(line.dec("cost") / total_cogs_opex))])
                      })
                      .collect();
        cogs_opex_breakout.push(record(vec![("category", Value::Text("Total".into())),
                                            ("total price", Value::Decimal(total_cogs_opex)),
                                            ("fraction", Value::Int(1))]));
        result.insert("cogs & opex breakout".into(), Value::List(cogs_opex_breakout));

        // Resumen de cogs
        let total_cogs = opex_lines.iter()
                                   .filter_map(Value::as_record)
                                   .fold(Decimal::ZERO, |acc, line| acc + line.dec("cogs cost"));
        let mut cogs_breakout: Vec<Value> = opex_lines.iter()
                                                      .filter_map(Value::as_record)
                                                      .map(|line| {
                                                          record(vec![("category",
                                                                       Value::Text(line.text("description").into())),
                                                                      ("total price",
                                                                       Value::Decimal(line.dec("cogs cost")))])
                                                      })
                                                      .collect();
        cogs_breakout.push(record(vec![("category", Value::Text("Total".into())),
                                       ("total price", Value::Decimal(total_cogs))]));
        result.insert("cogs breakout".into(), Value::List(cogs_breakout));

        // Resumen de opex
        let total_opex = opex_lines.iter()
                                   .filter_map(Value::as_record)
                                   .fold(Decimal::ZERO, |acc, line| acc + line.dec("opex cost"));
        let mut opex_breakout: Vec<Value> = opex_lines.iter()
                                                      .filter_map(Value::as_record)
                                                      .map(|line| {
                                                          record(vec![("category",
                                                                       Value::Text(line.text("description").into())),
                                                                      ("total price",
                                                                       Value::Decimal(line.dec("opex cost")))])
                                                      })
                                                      .collect();
        opex_breakout.push(record(vec![("category", Value::Text("Total".into())),
                                       ("total price", Value::Decimal(total_opex))]));
        result.insert("opex breakout".into(), Value::List(opex_breakout));

        // Desglose anual
        let interest_schedule: Vec<(i64, Decimal)> =
            inputs.list("interest repayment schedule")
                  .iter()
                  .filter_map(Value::as_record)
                  .map(|line| (line.int("year"), line.dec("amount")))
                  .collect();
        let interest_payment_for = |year: i64| -> Decimal {
            interest_schedule.iter()
                             .find(|(y, _)| *y == year)
                             .map(|(_, amount)| *amount)
                             .unwrap_or(Decimal::ZERO)
        };

        let sale_unit_rows = ctx.store().fetch_all(Database::Models, SQL_SALE_UNITS, &[])?;
        let lb_by_unit: HashMap<i64, Decimal> =
            sale_unit_rows.iter()
                          .filter_map(|row| {
                              let id = row.get("id").and_then(Value::as_int)?;
                              let lb = row.get("lb").and_then(Value::as_decimal).unwrap_or(Decimal::ONE);
                              Some((id, lb))
                          })
                          .collect();

        let depreciation_amortization = inputs.dec("depreciation");
        let tax_rate = inputs.dec("tax rate");
        let crops = inputs.list("crops");
        let mut annual_summary: Vec<Value> = Vec::new();
        for (idx, line) in inputs.list("wastage schedule").iter().enumerate() {
            let line = line.as_record().expect("coerced wastage element");
            let year = line.int("year");
            let wastage = line.dec("wastage");

            let mut base_yield = Decimal::ZERO;
            let mut base_revenue = Decimal::ZERO;
            let mut crop_yields: Vec<(String, Decimal, Decimal, Decimal)> = Vec::new();
            for crop in crops.iter().filter_map(Value::as_record) {
                let lost = crop.list("lost factors")[idx].as_record().expect("lost factor element").dec("lost");
                let single_crop_yield = crop.dec("yield") * lost;
                let lb = lb_by_unit.get(&crop.int("sale unit id")).copied().unwrap_or(Decimal::ONE);
                let single_crop_revenue = (single_crop_yield * lb).trunc() * crop.dec("price per unit");
                base_yield += single_crop_yield;
                base_revenue += single_crop_revenue;
                crop_yields.push((crop.text("crop type").to_string(),
                                  single_crop_yield * (Decimal::ONE - wastage),
                                  single_crop_revenue * (Decimal::ONE - wastage),
                                  crop.dec("system fraction")));
            }

            let total_yield = base_yield * (Decimal::ONE - wastage);
            let waste_adjusted_revenue = base_revenue * (Decimal::ONE - wastage);
            let interest_payment = interest_payment_for(year);
            let ebit = waste_adjusted_revenue - total_cogs - total_opex - depreciation_amortization;
            let taxes = (ebit - interest_payment).max(Decimal::ZERO) * tax_rate;
            let net_profit = ebit - interest_payment - taxes;
            let ebitda = net_profit + depreciation_amortization + interest_payment + taxes;

            // Precio de equilibrio por cultivo
            let crop_yield_lines: Vec<Value> =
                crop_yields.into_iter()
                           .map(|(crop_type, crop_yield, revenue, fraction)| {
                               let mut entry = ValueMap::new();
                               entry.insert("crop type".into(), Value::Text(crop_type));
                               entry.insert("yield".into(), Value::Decimal(crop_yield));
                               entry.insert("revenue".into(), Value::Decimal(revenue));
                               entry.insert("fraction".into(), Value::Decimal(fraction));
                               if crop_yield != Decimal::ZERO {
                                   entry.insert("even price".into(),
                                                Value::Decimal((revenue - net_profit * fraction) / crop_yield));
                               }
                               Value::Record(entry)
                           })
                           .collect();

            annual_summary.push(record(vec![("year", Value::Int(year)),
                                            ("wastage", Value::Decimal(wastage)),
                                            ("total yield", Value::Decimal(total_yield)),
                                            ("crop yield", Value::List(crop_yield_lines)),
                                            ("waste-adjusted revenue", Value::Decimal(waste_adjusted_revenue)),
                                            ("cogs", Value::Decimal(total_cogs)),
                                            ("opex", Value::Decimal(total_opex)),
                                            ("ebitda", Value::Decimal(ebitda)),
                                            ("depreciation & amortization",
                                             Value::Decimal(depreciation_amortization)),
                                            ("interest payment", Value::Decimal(interest_payment)),
                                            ("taxes", Value::Decimal(taxes)),
                                            ("net profit", Value::Decimal(net_profit))]));
        }
        result.insert("annual summary".into(), Value::List(annual_summary.clone()));

        // Flujo de caja
        let mut cash_flow: Vec<Value> = Vec::new();
        let mut remaining_balance = total_capex;
        for line in annual_summary.iter().filter_map(Value::as_record) {
            let net_profit = line.dec("net profit");
            let d_a = line.dec("depreciation & amortization");
            let net_changes_in_working_capital = -decimal::lit("0.05") * net_profit;
            let free_cash_flow = net_profit + d_a + net_changes_in_working_capital;
            remaining_balance -= free_cash_flow;
            if remaining_balance < Decimal::ZERO {
                remaining_balance = Decimal::ZERO;
            }
            cash_flow.push(record(vec![("year", line["year"].clone()),
                                       ("net profit", Value::Decimal(net_profit)),
                                       ("d&a", Value::Decimal(d_a)),
                                       ("net changes in working capital",
                                        Value::Decimal(net_changes_in_working_capital)),
                                       ("free cash flow", Value::Decimal(free_cash_flow)),
                                       ("remaining balance", Value::Decimal(remaining_balance))]));
        }
        result.insert("cash flow".into(), Value::List(cash_flow.clone()));

        // Valor presente del flujo de caja
        let discount_rate = inputs.dec("discount rate");
        let pv_of_cash_flows = cash_flow.iter()
                                        .filter_map(Value::as_record)
                                        .fold(Decimal::ZERO, |acc, line| {
                                            let year = line.int("year");
                                            acc + line.dec("free cash flow")
                                                  / (Decimal::ONE + discount_rate).powi(year)
                                        });
        result.insert("pv of cash flows".into(), Value::Decimal(pv_of_cash_flows));

        // Período de repago
        let mut sum_free_cash_flow = Decimal::ZERO;
        result.insert("payback period".into(), Value::Null);
        for line in cash_flow.iter().filter_map(Value::as_record) {
            let free_cash_flow = line.dec("free cash flow");
            if sum_free_cash_flow + free_cash_flow >= total_capex {
                let year = Decimal::from(line.int("year"));
                result.insert("payback period".into(),
                              Value::Decimal(year + (total_capex - sum_free_cash_flow) / free_cash_flow
                                             - Decimal::ONE));
                break;
            }
            sum_free_cash_flow += free_cash_flow;
        }

        // Resumen financiero
        result.insert("financial summary".into(),
                      Value::List(vec![record(vec![("capex", Value::Decimal(total_capex)),
                                                   ("opex", Value::Decimal(total_opex)),
                                                   ("cogs", Value::Decimal(total_cogs)),
                                                   ("opex + cogs", Value::Decimal(total_cogs_opex)),
                                                   ("max annual revenue",
                                                    Value::Decimal(inputs.dec("base revenue"))),
                                                   ("payback period", result["payback period"].clone())])]));

        // Resumen operativo (años 1, 5 y 10)
        let mut operating_summary: Vec<Value> = Vec::new();
        for target_year in [1_i64, 5, 10] {
            let year_summary = annual_summary.iter()
                                             .filter_map(Value::as_record)
                                             .find(|line| line.int("year") == target_year);
            if let Some(year_summary) = year_summary {
                let waste_adjusted_revenue = year_summary.dec("waste-adjusted revenue");
                let ebitda = year_summary.dec("ebitda");
                let net_profit = year_summary.dec("net profit");
                let (ebitda_margin, net_margin) = if waste_adjusted_revenue == Decimal::ZERO {
                    (Decimal::ZERO, Decimal::ZERO)
                } else {
                    (ebitda / waste_adjusted_revenue, net_profit / waste_adjusted_revenue)
                };
                operating_summary.push(record(vec![("year", Value::Int(target_year)),
                                                   ("wastage", Value::Decimal(year_summary.dec("wastage"))),
                                                   ("waste-adjusted revenue",
                                                    Value::Decimal(waste_adjusted_revenue)),
                                                   ("ebitda", Value::Decimal(ebitda)),
                                                   ("ebitda margin", Value::Decimal(ebitda_margin)),
                                                   ("net profit", Value::Decimal(net_profit)),
                                                   ("net margin", Value::Decimal(net_margin))]));
            }
        }
        result.insert("operating summary".into(), Value::List(operating_summary));

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
    use agro_core::{row, InMemoryRowStore};
    use std::sync::Arc;

    fn lost_factors(values: &[&str]) -> Value {
        Value::List(values.iter()
                          .map(|v| record(vec![("lost", Value::Decimal(decimal::lit(v)))]))
                          .collect())
    }

    fn base_args() -> ValueMap {
        let mut args = ValueMap::new();
        args.insert("capex line items".into(),
                    Value::List(vec![record(vec![("description", Value::Text("Tools".into())),
                                                 ("cost", Value::Int(800))]),
                                     record(vec![("description", Value::Text("Real Estate".into())),
                                                 ("cost", Value::Int(200))])]));
        args.insert("opex line items".into(),
                    Value::List(vec![record(vec![("description", Value::Text("Labor".into())),
                                                 ("cost", Value::Int(100)),
                                                 ("cogs cost", Value::Int(80)),
                                                 ("opex cost", Value::Int(20))])]));
        args.insert("wastage schedule".into(),
                    Value::List(vec![record(vec![("year", Value::Int(1)),
                                                 ("wastage", Value::Decimal(decimal::lit("0.5")))]),
                                     record(vec![("year", Value::Int(2)),
                                                 ("wastage", Value::Decimal(decimal::lit("0.25")))])]));
        args.insert("crops".into(),
                    Value::List(vec![record(vec![("crop type", Value::Text("Lettuce".into())),
                                                 ("yield", Value::Int(1000)),
                                                 ("lost factors", lost_factors(&["1", "1"])),
                                                 ("price per unit", Value::Int(2)),
                                                 ("system fraction", Value::Int(1)),
                                                 ("sale unit id", Value::Int(1))])]));
        args.insert("base yield".into(), Value::Int(1000));
        args.insert("base revenue".into(), Value::Int(2000));
        args.insert("depreciation".into(), Value::Int(100));
        args.insert("interest repayment schedule".into(), Value::List(vec![]));
        args.insert("tax rate".into(), Value::Decimal(decimal::lit("0.5")));
        args
    }

    fn ctx() -> RuntimeContext {
        let store = InMemoryRowStore::new().with_rows(Database::Models,
                                                      SQL_SALE_UNITS,
                                                      &[],
                                                      vec![row(&[("id", Value::Int(1)),
                                                                 ("description", Value::Text("1 lb".into())),
                                                                 ("multiplier", Value::Int(1)),
                                                                 ("lb", Value::Int(1))])]);
        RuntimeContext::new(Arc::new(store))
    }

    #[test]
    fn breakouts_close_with_a_total_row() {
        let result = FinancialsMain.compute(&ctx(), &base_args(), true).unwrap();
        let capex = result.list("capex breakout");
        let total = capex.last().unwrap().as_record().unwrap();
        assert_eq!(total.text("category"), "Total");
        assert_eq!(total.dec("total price"), decimal::lit("1000.00"));
        assert_eq!(capex[0].as_record().unwrap().dec("fraction"), decimal::lit("0.8000"));
    }

    #[test]
    fn annual_summary_applies_wastage_and_taxes() {
        let result = FinancialsMain.compute(&ctx(), &base_args(), false).unwrap();
        let year_one = result.list("annual summary")[0].as_record().unwrap().clone();
        // revenue 2000 * (1 - 0.5) = 1000; ebit = 1000 - 80 - 20 - 100 = 800
        assert_eq!(year_one.dec("waste-adjusted revenue"), decimal::lit("1000"));
        assert_eq!(year_one.dec("taxes"), decimal::lit("400"));
        assert_eq!(year_one.dec("net profit"), decimal::lit("400"));
        assert_eq!(year_one.dec("ebitda"), decimal::lit("900"));
    }

    #[test]
    fn quantized_output_drops_breakeven_scratch_fields() {
        let result = FinancialsMain.compute(&ctx(), &base_args(), true).unwrap();
        let year_one = result.list("annual summary")[0].as_record().unwrap();
        let crop_line = year_one.list("crop yield")[0].as_record().unwrap();
        assert!(crop_line.get("revenue").is_none());
        assert!(crop_line.get("fraction").is_none());
        assert!(crop_line.get("even price").is_some());
    }

    #[test]
    fn payback_period_is_null_when_never_recovered() {
        let mut args = base_args();
        args.insert("depreciation".into(), Value::Int(0));
        args.insert("opex line items".into(),
                    Value::List(vec![record(vec![("description", Value::Text("Labor".into())),
                                                 ("cost", Value::Int(100000)),
                                                 ("cogs cost", Value::Int(80000)),
                                                 ("opex cost", Value::Int(20000))])]));
        let result = FinancialsMain.compute(&ctx(), &args, true).unwrap();
        assert!(result["payback period"].is_null());
    }
}
