#[path = "shared/sample_input.rs"]
mod sample_input;

use std::error::Error;

use rv_report_pdf::ReportPdfBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    let input = sample_input::build_sample_input();
    let report = ReportPdfBuilder::new()
        .with_subtitle(Some("Personalized Technology Checklist".to_string()))
        .build(&input)?;

    std::fs::write(&report.suggested_filename, &report.bytes)?;
    println!(
        "Generated {} ({} bytes, {} pages)",
        report.suggested_filename,
        report.bytes.len(),
        report.page_count
    );
    Ok(())
}
