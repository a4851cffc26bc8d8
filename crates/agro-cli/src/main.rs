use std::sync::Arc;

use agro_core::{RuntimeContext, Value, ValueMap};
use agro_models::ModelId;

fn main() {
    // Cargar .env si existe para obtener DATABASE_URL
    let _ = dotenvy::dotenv();
    // CLI mínima: `agro --model <name> --cmd <cmd> [--input <field>] [--args <JSON>]`
    let args: Vec<String> = std::env::args().collect();
    let mut model_name: Option<String> = None;
    let mut cmd: Option<String> = None;
    let mut input: Option<String> = None;
    let mut raw_args: Option<String> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--model" => {
                i += 1;
                if i < args.len() { model_name = Some(args[i].clone()); }
            }
            "--cmd" => {
                i += 1;
                if i < args.len() { cmd = Some(args[i].clone()); }
            }
            "--input" => {
                i += 1;
                if i < args.len() { input = Some(args[i].clone()); }
            }
            "--args" => {
                i += 1;
                if i < args.len() { raw_args = Some(args[i].clone()); }
            }
            "--list" => {
                for id in ModelId::ALL {
                    println!("{}", id.name());
                }
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    let (model_name, cmd) = match (model_name, cmd) {
        (Some(m), Some(c)) => (m, c),
        _ => {
            eprintln!("Uso: agro --model <name> --cmd info|inputs|outputs|input_values|compute|debug [--input <field>] [--args <JSON>] | agro --list");
            std::process::exit(2);
        }
    };

    let model = match ModelId::from_name(&model_name) {
        Ok(id) => id.model(),
        Err(e) => {
            eprintln!("[agro] {e}");
            std::process::exit(4);
        }
    };

    // Los comandos puramente descriptivos no necesitan contexto de runtime
    match cmd.as_str() {
        "info" => {
            println!("{}", model.info().to_json());
            return;
        }
        "inputs" => {
            println!("{}", model.input_type().to_json());
            return;
        }
        "outputs" => {
            println!("{}", model.output_type().to_json());
            return;
        }
        _ => {}
    }

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("[agro {cmd}] requiere DATABASE_URL para operar contra el backend de datos");
        std::process::exit(4);
    }
    let ctx = RuntimeContext::new(Arc::new(agro_persistence::PgRowStore::from_env()));

    match cmd.as_str() {
        "input_values" => {
            let field = match input {
                Some(f) => f,
                None => {
                    eprintln!("[agro input_values] falta --input <field>");
                    std::process::exit(2);
                }
            };
            match ctx.input_values(model, &field) {
                Ok(rows) => {
                    let values: Vec<serde_json::Value> =
                        rows.iter().map(|row| Value::Record(row.clone()).to_json()).collect();
                    println!("{}", serde_json::Value::Array(values));
                }
                Err(e) => {
                    eprintln!("[agro input_values] {e}");
                    std::process::exit(4);
                }
            }
        }
        "compute" | "debug" => {
            let raw = match raw_args {
                Some(r) => r,
                None => {
                    eprintln!("[agro {cmd}] falta --args <JSON>");
                    std::process::exit(2);
                }
            };
            let parsed: serde_json::Value = match serde_json::from_str(&raw) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("[agro {cmd}] args JSON parse error: {e}");
                    std::process::exit(3);
                }
            };
            let call_args: ValueMap = match Value::from_json(&parsed) {
                Value::Record(map) => map,
                _ => {
                    eprintln!("[agro {cmd}] args debe ser un objeto JSON");
                    std::process::exit(3);
                }
            };
            // `debug` es compute sin cuantizar: expone entradas, intermedios
            // y contadores junto a las salidas declaradas
            let quantize = cmd == "compute";
            match ctx.invoke(model, &call_args, quantize) {
                Ok(result) => println!("{}", Value::Record(result).to_json()),
                Err(e) => {
                    eprintln!("[agro {cmd}] {e}");
                    std::process::exit(5);
                }
            }
        }
        other => {
            eprintln!("[agro] comando desconocido: {other}");
            std::process::exit(2);
        }
    }
}
