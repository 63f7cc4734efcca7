use libcoords::{diagnostics, dms, location, parse, version, Axis, DMSCoordinate};
use std::{env, error::Error, fs, process};
use tracing_subscriber::EnvFilter;

fn usage() -> String {
    let name = version::name();
    format!(
        "{}\n\nUsage:\n  \
         {name} convert <DMS>...\n  \
         {name} dms <decimal> <lat|lon>\n  \
         {name} distance <lat1> <lon1> <lat2> <lon2>\n  \
         {name} locations <file.json>\n  \
         {name} check",
        version::banner(),
        name = name
    )
}

fn parse_f64(s: &str) -> Result<f64, Box<dyn Error>> {
    s.parse::<f64>()
        .map_err(|e| format!("Invalid number {:?}: {}", s, e).into())
}

fn convert(inputs: &[String]) {
    for input in inputs {
        match input.parse::<DMSCoordinate>() {
            Ok(dms) => println!(
                "{:30} {:>12.6}  {:?}",
                input,
                dms.to_decimal(),
                dms.direction.axis()
            ),
            Err(e) => {
                println!("{:30} invalid ({})", input, e);
                // Show where the grammar gave up, if it did
                if let Err(err) = DMSCoordinate::parse(input.trim()) {
                    eprintln!("{}", parse::pretty_error_message(input.trim(), err));
                }
            }
        }
    }
}

fn to_dms(decimal: &str, axis: &str) -> Result<(), Box<dyn Error>> {
    let decimal = parse_f64(decimal)?;
    let axis = match axis {
        "lat" | "latitude" => Axis::Latitude,
        "lon" | "lng" | "longitude" => Axis::Longitude,
        other => return Err(format!("Unknown axis {:?}, expected lat or lon", other).into()),
    };
    let dms = DMSCoordinate::from_decimal(decimal, axis);
    if let Err(e) = dms.validate() {
        eprintln!("warning: {}", e);
    }
    println!("{}", dms::format_dms_string(&dms));
    Ok(())
}

fn locations(path: &str) -> Result<(), Box<dyn Error>> {
    let data = fs::read(path)?;
    // Decode record by record so that one badly typed entry doesn't sink the whole file
    let values: Vec<serde_json::Value> = serde_json::from_slice(&data)?;
    let results = location::process_location_values(&values);

    println!("{:6} {:30} {:>12} {:>12}", "Index", "Name", "Latitude", "Longitude");
    println!("--------------------------------------------------------------------");
    let mut accepted = 0;
    for (idx, coord) in results.iter().enumerate() {
        if let Some(coord) = coord {
            let name = values[idx].get("name").and_then(|n| n.as_str()).unwrap_or("");
            println!(
                "{:6} {:30} {:>12.6} {:>12.6}",
                idx, name, coord.latitude, coord.longitude
            );
            accepted += 1;
        }
    }
    println!();
    println!(
        "{} of {} locations accepted, {} skipped",
        accepted,
        values.len(),
        values.len() - accepted
    );
    Ok(())
}

fn check() -> bool {
    let report = diagnostics::run_accuracy_check(diagnostics::DEFAULT_TOLERANCE);

    println!("{:25} {:>12} {:>12} {:>10} {:>10}  {}", "Landmark", "Latitude", "Longitude", "Lat err", "Lon err", "Result");
    println!("------------------------------------------------------------------------------------");
    for c in report.checks.iter() {
        let fmt = |x: Option<f64>, prec: usize| match x {
            Some(x) => format!("{:.*}", prec, x),
            None => "-".to_string(),
        };
        println!(
            "{:25} {:>12} {:>12} {:>10} {:>10}  {}",
            c.name,
            fmt(c.latitude, 6),
            fmt(c.longitude, 6),
            fmt(c.latitude_error, 6),
            fmt(c.longitude_error, 6),
            if c.passed { "ok" } else { "FAILED" }
        );
    }
    println!();
    println!(
        "{}/{} landmarks within {} degrees",
        report.passed(),
        report.checks.len(),
        report.tolerance
    );
    report.all_passed()
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.get(0).map(String::as_str);

    match (command, &args[args.len().min(1)..]) {
        (Some("convert"), rest) if !rest.is_empty() => convert(rest),
        (Some("dms"), [decimal, axis]) => to_dms(decimal, axis)?,
        (Some("distance"), [lat1, lon1, lat2, lon2]) => {
            let d = libcoords::calculate_distance(
                parse_f64(lat1)?,
                parse_f64(lon1)?,
                parse_f64(lat2)?,
                parse_f64(lon2)?,
            );
            println!("{:.3} km", d);
        }
        (Some("locations"), [path]) => locations(path)?,
        (Some("check"), []) => {
            if !check() {
                process::exit(1);
            }
        }
        (Some("--version"), _) => println!("{}", version::banner()),
        _ => {
            eprintln!("{}", usage());
            process::exit(2);
        }
    }

    Ok(())
}
