use chrono::{Datelike, Local};
use dotenv::dotenv;
use kvadrat::{AppConfig, CpiTable, CsvReporter, ParsedReport, RawInfoParser, RawInfoRetriever};
use std::fs;

use log::LevelFilter;

use log::{error, info};

async fn scrape_city_report(
    retriever: &RawInfoRetriever,
    parser: &RawInfoParser,
    config: &AppConfig,
    city: &str,
    current_year: i32,
    current_month: u32,
) -> anyhow::Result<ParsedReport> {
    let mut report = ParsedReport::new();
    for year in config.start_year..=current_year {
        let last_month = if year == current_year { current_month } else { 12 };
        for month in 1..=last_month {
            info!("retrieving {city} {year}-{month:02}");
            let html = retriever.retrieve(city, year, month).await?;
            report.merge(parser.parse(&html)?);
        }
    }
    Ok(report)
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    fs::create_dir_all(&config.destination_folder)?;

    let retriever = RawInfoRetriever::new(&config);
    let parser = RawInfoParser::new();
    let inflation = CpiTable::from_path(&config.cpi_series)?;
    let reporter = CsvReporter::new(&config, Box::new(inflation))?;

    let today = Local::now();
    for city in config.report_cities() {
        let report = scrape_city_report(
            &retriever,
            &parser,
            &config,
            &city,
            today.year(),
            today.month(),
        )
        .await?;
        let path = reporter.generate_report(&city, &report)?;
        info!("report for {city} written to {}", path.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    if let Err(e) = run().await {
        error!("report generation failed: {e:#}");
        std::process::exit(1);
    }
}
