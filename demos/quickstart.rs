use deeptime::{format, parse, CosmicTime, Duration, Instant, Locale};

fn main() -> deeptime::Result<()> {
    let locale = Locale::default();

    // the age of the universe, to the second
    let age = Duration::builder()
        .years(13.8e9)
        .days(42.0)
        .seconds(7.0)
        .build()?;

    println!("extensible: {}", format(&age, "e", &locale)?);
    println!("round-trip: {}", format(&age, "o", &locale)?);
    println!("parsed back: {}", parse(&format(&age, "o", &locale)?, &locale)?);

    // navigate the standard cosmological timeline
    let mut timeline = CosmicTime::default();
    println!("timeline: {timeline}");

    let hadron = timeline.epoch_of(&Duration::from_seconds(0.5)?);
    println!("0.5 s after the start: {}", timeline.epochs()[hadron as usize]);

    timeline.add_time(&Duration::from_years(1_000_000.0)?);
    let since_origin = timeline.difference(&Instant::origin(), timeline.now());
    println!("now, from the origin: {since_origin}");
    Ok(())
}
