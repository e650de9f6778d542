use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, ValueEnum};
use horoscope::{FixedEphemeris, GeoLocation, Horoscope, Origin};
use std::fmt::{self, Write};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Pretty printed JSON chart.
    Json,
    /// Human readable summary.
    Text,
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Local birth date, YYYY-MM-DD.
    #[arg(long)]
    date: NaiveDate,

    /// Local birth time, HH:MM or HH:MM:SS.
    #[arg(long, value_parser = parse_time)]
    time: NaiveTime,

    /// Latitude in degrees, north positive (default: [location] in the settings file).
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude in degrees, east positive (default: [location] in the settings file).
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Offset of local time from UTC in minutes, e.g. 180 for UTC+3.
    #[arg(long, allow_negative_numbers = true)]
    utc_offset: Option<i32>,

    /// House system, overrides the settings file.
    #[arg(long)]
    house_system: Option<String>,

    /// Zodiac (tropical or sidereal), overrides the settings file.
    #[arg(long)]
    zodiac: Option<String>,

    /// Settings file (default: configs/horoscope.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON ephemeris snapshot with the raw body longitudes.
    #[arg(long)]
    ephemeris: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Log each construction step.
    #[arg(long, short)]
    verbose: bool,
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|e| format!("expected HH:MM or HH:MM:SS: {e}"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let mut config = horoscope_config::load_config(args.config.as_deref())?;
    if let Some(system) = &args.house_system {
        config.chart.house_system = system.clone();
    }
    if let Some(zodiac) = &args.zodiac {
        config.chart.zodiac = zodiac.clone();
    }

    let configured = config.location;
    let latitude = args.lat.or(configured.map(|l| l.latitude));
    let longitude = args.lon.or(configured.map(|l| l.longitude));
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        anyhow::bail!("No observer location: pass --lat and --lon or add a [location] table");
    };
    let location = GeoLocation {
        latitude,
        longitude,
    };
    let utc_offset = args
        .utc_offset
        .or(configured.map(|l| l.utc_offset_minutes))
        .unwrap_or(0);

    let origin = Origin::from_naive(args.date.and_time(args.time), utc_offset, location)
        .context("Invalid birth moment or place")?;
    log::debug!(
        "origin: JD {:.5}, LST {:.4}, obliquity {:.6}",
        origin.julian_day(),
        origin.local_sidereal_time(),
        origin.obliquity()
    );

    let json = std::fs::read_to_string(&args.ephemeris)
        .with_context(|| format!("Could not read ephemeris file {}", args.ephemeris.display()))?;
    let source = FixedEphemeris::from_json(&json)
        .with_context(|| format!("Malformed ephemeris file {}", args.ephemeris.display()))?
        .with_mean_lunar_orbit();

    let horoscope =
        Horoscope::from_config(origin, &config.chart, &source).context("Chart construction failed")?;

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&horoscope)?),
        Format::Text => {
            let mut text = String::new();
            render_text(&mut text, &horoscope).context("Failed to render chart text")?;
            print!("{text}");
        }
    }
    Ok(())
}

fn render_text(out: &mut impl Write, horoscope: &Horoscope) -> fmt::Result {
    let labels = horoscope.labels();

    writeln!(
        out,
        "{} / {} / sun sign {}",
        labels.get(horoscope.house_system().key()),
        labels.get(horoscope.zodiac().key()),
        labels.get(horoscope.sun_sign().key())
    )?;
    for angle in horoscope.angles() {
        writeln!(
            out,
            "{:<12} {:<12} {:>14}  house {}",
            labels.get(angle.key.key()),
            labels.get(angle.sign.key()),
            angle.position.arc_degrees_in_sign().to_string(),
            angle.house
        )?;
    }

    writeln!(out)?;
    for house in horoscope.houses() {
        let sign = house.cusp.sign_position().sign;
        writeln!(
            out,
            "house {:>2}    {:<12} {:>14}",
            house.id,
            labels.get(sign.key()),
            house.cusp.arc_degrees_in_sign().to_string()
        )?;
    }

    writeln!(out)?;
    for body in horoscope.celestial_bodies() {
        writeln!(
            out,
            "{:<12} {:<12} {:>14}  house {:>2}{}",
            labels.get(body.key.key()),
            labels.get(body.sign.key()),
            body.position.arc_degrees_in_sign().to_string(),
            body.house,
            if body.is_retrograde { "  R" } else { "" }
        )?;
    }
    for point in horoscope.celestial_points() {
        writeln!(
            out,
            "{:<12} {:<12} {:>14}  house {:>2}",
            labels.get(point.key.key()),
            labels.get(point.sign.key()),
            point.position.arc_degrees_in_sign().to_string(),
            point.house
        )?;
    }

    writeln!(out)?;
    for aspect in horoscope.aspects() {
        writeln!(
            out,
            "{} {} {}  ({:.2}°, {:+.2})",
            labels.get(aspect.point1.key()),
            labels.get(aspect.aspect.key()),
            labels.get(aspect.point2.key()),
            aspect.separation,
            aspect.deviation
        )?;
    }
    Ok(())
}
