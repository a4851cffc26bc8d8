//! Demo end-to-end: corre el deliverable de suelo contra un row store en
//! memoria con datos de muestra (o contra Postgres con la feature `pg_demo`).

use std::sync::Arc;

use agro_core::{decimal, row, Database, InMemoryRowStore, RowStore, RuntimeContext, Value, ValueMap};
use agro_models::ModelId;
use rust_decimal::Decimal;

const SQL_LAND_STATUS: &str = "SELECT is_rent, is_buy FROM land_status WHERE id=$1";
const SQL_CROP: &str = "SELECT * FROM crops WHERE id=$1";
const SQL_CROP_PARAMS: &str = "
    SELECT temp_absolute_min, temp_optimal_min, temp_optimal_max, temp_absolute_max, optimal_crop_cycle
    FROM crops WHERE id=$1
";
const SQL_CYCLES: &str = "
    select num_cycles, num_complementary_cycles
    from soil_cycles($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
";
const SQL_SALE_UNITS: &str = "SELECT id, description, multiplier FROM sale_units";
const SQL_SALE_UNITS_LB: &str = "SELECT id, description, multiplier, lb FROM sale_units";
const SQL_DEFAULT_PRICE: &str = "
    select
        case
            when u.multiplier is null then default_price_per_each_market
            else default_price_per_lb_market * u.multiplier
        end price_per_unit
    from
        crops c
        cross join sale_units u
    where
        c.id = $1 and u.id = $2
";
const SQL_CAPEX_PRICES: &str = "
    select price_irrigation, price_fertility, price_groundwork, price_nursery
    from soil_capex_lookup
    where max_bedspace is null or max_bedspace > $1
    order by id
    limit 1
";
const SQL_PACKAGING_COST: &str = "SELECT cost FROM packaging WHERE id=$1";
const SQL_GROWER_EXPERIENCE: &str = "SELECT base_wastage w FROM soil_grower_experience WHERE id=$1";

struct DemoCrop {
    id: i64,
    crop_type: &'static str,
    plants_per_sqft: &'static str,
    substrate_requirement: &'static str,
    lbs_per_plant_per_cycle: &'static str,
    price_lb_market: &'static str,
    price_each_market: &'static str,
    difficulty_soil: i64,
    temps: [i64; 4],
    optimal_crop_cycle: i64,
    num_cycles: i64,
    num_complementary_cycles: i64,
}

const DEMO_CROPS: [DemoCrop; 2] = [DemoCrop { id: 1,
                                              crop_type: "Lettuce",
                                              plants_per_sqft: "1.5",
                                              substrate_requirement: "0.1",
                                              lbs_per_plant_per_cycle: "0.5",
                                              price_lb_market: "1.8",
                                              price_each_market: "0.9",
                                              difficulty_soil: 30,
                                              temps: [-2, 10, 24, 35],
                                              optimal_crop_cycle: 45,
                                              num_cycles: 8,
                                              num_complementary_cycles: 2 },
                                   DemoCrop { id: 2,
                                              crop_type: "Tomato",
                                              plants_per_sqft: "2",
                                              substrate_requirement: "0.05",
                                              lbs_per_plant_per_cycle: "0.3",
                                              price_lb_market: "2.5",
                                              price_each_market: "1.2",
                                              difficulty_soil: 40,
                                              temps: [0, 12, 26, 38],
                                              optimal_crop_cycle: 73,
                                              num_cycles: 5,
                                              num_complementary_cycles: 1 }];

fn crop_row(crop: &DemoCrop) -> agro_core::Row {
    let mut fields = vec![("id".to_string(), Value::Int(crop.id)),
                          ("crop_type".to_string(), Value::Text(crop.crop_type.to_string())),
                          ("plants_per_sqft".to_string(), Value::Decimal(decimal::lit(crop.plants_per_sqft))),
                          ("substrate_requirement".to_string(),
                           Value::Decimal(decimal::lit(crop.substrate_requirement))),
                          ("lbs_per_plant_per_cycle".to_string(),
                           Value::Decimal(decimal::lit(crop.lbs_per_plant_per_cycle))),
                          ("default_price_per_lb_market".to_string(),
                           Value::Decimal(decimal::lit(crop.price_lb_market))),
                          ("default_price_per_each_market".to_string(),
                           Value::Decimal(decimal::lit(crop.price_each_market))),
                          ("difficulty_soil".to_string(), Value::Int(crop.difficulty_soil)),
                          ("temp_absolute_min".to_string(), Value::Int(crop.temps[0])),
                          ("temp_optimal_min".to_string(), Value::Int(crop.temps[1])),
                          ("temp_optimal_max".to_string(), Value::Int(crop.temps[2])),
                          ("temp_absolute_max".to_string(), Value::Int(crop.temps[3])),
                          ("optimal_crop_cycle".to_string(), Value::Int(crop.optimal_crop_cycle))];
    // primer año de cosecha parcial, el resto a rendimiento pleno
    for year in 1..=15 {
        let lost = if year == 1 { decimal::lit("0.9") } else { Decimal::ONE };
        fields.push((format!("yr{year}"), Value::Decimal(lost)));
    }
    fields.into_iter().collect()
}

fn crop_params_row(crop: &DemoCrop) -> agro_core::Row {
    row(&[("temp_absolute_min", Value::Int(crop.temps[0])),
          ("temp_optimal_min", Value::Int(crop.temps[1])),
          ("temp_optimal_max", Value::Int(crop.temps[2])),
          ("temp_absolute_max", Value::Int(crop.temps[3])),
          ("optimal_crop_cycle", Value::Int(crop.optimal_crop_cycle))])
}

fn cycles_params(latitude: &str, longitude: &str, crop: &DemoCrop, complementary: &DemoCrop) -> Vec<Value> {
    vec![Value::Decimal(decimal::lit(latitude)),
         Value::Decimal(decimal::lit(longitude)),
         Value::Int(crop.temps[0]),
         Value::Int(crop.temps[1]),
         Value::Int(crop.temps[2]),
         Value::Int(crop.temps[3]),
         Value::Int(crop.optimal_crop_cycle),
         Value::Int(complementary.temps[0]),
         Value::Int(complementary.temps[1]),
         Value::Int(complementary.temps[2]),
         Value::Int(complementary.temps[3]),
         Value::Int(complementary.optimal_crop_cycle),
         Value::Decimal(decimal::lit("0.7")),
         Value::Int(3)]
}

fn demo_store(latitude: &str, longitude: &str) -> InMemoryRowStore {
    let store = InMemoryRowStore::new()
        .with_rows(Database::Models,
                   SQL_LAND_STATUS,
                   &[Value::Int(1)],
                   vec![row(&[("is_rent", Value::Int(1)), ("is_buy", Value::Int(0))])])
        .with_rows(Database::Models,
                   SQL_SALE_UNITS,
                   &[],
                   vec![row(&[("id", Value::Int(1)),
                              ("description", Value::Text("1 lb".into())),
                              ("multiplier", Value::Int(1))]),
                        row(&[("id", Value::Int(2)),
                              ("description", Value::Text("each".into())),
                              ("multiplier", Value::Null)])])
        .with_rows(Database::Models,
                   SQL_SALE_UNITS_LB,
                   &[],
                   vec![row(&[("id", Value::Int(1)),
                              ("description", Value::Text("1 lb".into())),
                              ("multiplier", Value::Int(1)),
                              ("lb", Value::Int(1))]),
                        row(&[("id", Value::Int(2)),
                              ("description", Value::Text("each".into())),
                              ("multiplier", Value::Null),
                              ("lb", Value::Null)])])
        .with_rows(Database::Models,
                   SQL_CAPEX_PRICES,
                   &[Value::Int(20000)],
                   vec![row(&[("price_irrigation", Value::Decimal(decimal::lit("0.5"))),
                              ("price_fertility", Value::Decimal(decimal::lit("0.2"))),
                              ("price_groundwork", Value::Decimal(decimal::lit("0.1"))),
                              ("price_nursery", Value::Int(30))])])
        .with_rows(Database::Models,
                   SQL_PACKAGING_COST,
                   &[Value::Int(1)],
                   vec![row(&[("cost", Value::Decimal(decimal::lit("0.03")))])])
        .with_rows(Database::Models,
                   SQL_GROWER_EXPERIENCE,
                   &[Value::Int(1)],
                   vec![row(&[("w", Value::Decimal(decimal::lit("0.05")))])]);

    let complementary = &DEMO_CROPS[0];
    for crop in &DEMO_CROPS {
        store.insert_rows(Database::Models, SQL_CROP, &[Value::Int(crop.id)], vec![crop_row(crop)]);
        store.insert_rows(Database::Models,
                          SQL_CROP_PARAMS,
                          &[Value::Int(crop.id)],
                          vec![crop_params_row(crop)]);
        store.insert_rows(Database::Location,
                          SQL_CYCLES,
                          &cycles_params(latitude, longitude, crop, complementary),
                          vec![row(&[("num_cycles", Value::Int(crop.num_cycles)),
                                     ("num_complementary_cycles", Value::Int(crop.num_complementary_cycles))])]);
        store.insert_rows(Database::Models,
                          SQL_DEFAULT_PRICE,
                          &[Value::Int(crop.id), Value::Int(crop.id)],
                          vec![row(&[("price_per_unit",
                                      Value::Decimal(decimal::lit(crop.price_lb_market)
                                                     - decimal::lit("0.2")))])]);
    }
    store
}

fn demo_args(latitude: &str, longitude: &str) -> ValueMap {
    let crops: Vec<Value> = DEMO_CROPS.iter()
                                      .enumerate()
                                      .map(|(idx, crop)| {
                                          let fraction = if idx == 0 { "0.6" } else { "0.4" };
                                          Value::Record(row(&[("id", Value::Int(crop.id)),
                                                              ("system fraction",
                                                               Value::Decimal(decimal::lit(fraction))),
                                                              ("sale unit id", Value::Int(crop.id)),
                                                              ("price per unit", Value::Int(1 + crop.id))]))
                                      })
                                      .collect();
    let mut args = ValueMap::new();
    args.insert("latitude".into(), Value::Decimal(decimal::lit(latitude)));
    args.insert("longitude".into(), Value::Decimal(decimal::lit(longitude)));
    args.insert("land cost".into(), Value::Int(5));
    args.insert("site area".into(), Value::Int(20000));
    args.insert("crops".into(), Value::List(crops));
    args
}

fn main() {
    let latitude = "42.36";
    let longitude = "-71.05";

    #[cfg(feature = "pg_demo")]
    let store: Arc<dyn RowStore> = Arc::new(agro_persistence::PgRowStore::from_env());
    #[cfg(not(feature = "pg_demo"))]
    let store: Arc<dyn RowStore> = Arc::new(demo_store(latitude, longitude));

    let ctx = RuntimeContext::new(store);
    let deliverable = ModelId::SoilDeliverables.model();
    println!("{}", deliverable.info().to_json());

    match ctx.invoke(deliverable, &demo_args(latitude, longitude), true) {
        Ok(result) => {
            let json = Value::Record(result).to_json();
            println!("{}", serde_json::to_string_pretty(&json).expect("serialize result"));
        }
        Err(e) => {
            eprintln!("[agro-demo] {e}");
            std::process::exit(1);
        }
    }
}
