#[path = "shared/sample_input.rs"]
mod sample_input;

#[cfg(feature = "bookmarks")]
use std::error::Error;

#[cfg(feature = "bookmarks")]
fn main() -> Result<(), Box<dyn Error>> {
    let input = sample_input::build_sample_input();
    let report = rv_report_pdf::ReportPdfBuilder::new()
        .with_subtitle(Some("Personalized Technology Checklist".to_string()))
        .build_with_bookmarks(&input)?;

    std::fs::write(&report.suggested_filename, &report.bytes)?;
    println!(
        "Generated {} ({} bytes, {} pages) with section bookmarks",
        report.suggested_filename,
        report.bytes.len(),
        report.page_count
    );
    for section in &report.section_pages {
        if let Some(page) = section.page() {
            println!("  {} -> page {page}", section.title());
        }
    }
    Ok(())
}

#[cfg(not(feature = "bookmarks"))]
fn main() {
    eprintln!(
        "Enable the `bookmarks` feature to run this example: \
         cargo run --example buyer_report_bookmarks --features bookmarks"
    );
}
