use rv_report_pdf::fonts;
use rv_report_pdf::model::{ChecklistItem, Priority, ReportInput};
use rv_report_pdf::{RenderedReport, ReportPdfBuilder};
use sha2::{Digest, Sha256};

fn sample_input() -> ReportInput {
    ReportInput::new(
        "You are planning extended boondocking trips with remote work on the side. \
         Connectivity and power independence matter more than entertainment extras. \
         Focus the inspection on the electrical system first.",
        "Expect the connectivity and solar upgrades to add a meaningful amount to the \
         purchase price. Budget a reserve for the first year of ownership. Dealer \
         financing rarely covers aftermarket equipment.",
    )
    .with_checklist_items([
        ChecklistItem::new("Power", "Lithium battery bank")
            .with_priority(Priority::Essential)
            .with_questions([
                "What is the usable capacity in amp hours?",
                "Is the battery heater wired to shore power?",
            ]),
        ChecklistItem::new("Connectivity", "Cellular router with external antenna")
            .with_priority(Priority::Essential)
            .with_question("Which carriers does the modem support?"),
        ChecklistItem::new("Power", "Roof solar prewire")
            .with_priority(Priority::Important)
            .with_question("What gauge is the prewired cable run?"),
        ChecklistItem::new("Comfort", "Smart thermostat").with_priority(Priority::NiceToHave),
    ])
    .with_dealer_questions([
        "Is the warranty transferable to a second owner?",
        "Which service items are covered in the first year?",
        "Can the solar prewire handle a 400W array?",
    ])
}

fn render_sample_report() -> Option<RenderedReport> {
    if !fonts::default_fonts_available() {
        return None;
    }

    let report = ReportPdfBuilder::new()
        .build(&sample_input())
        .expect("render sample report");
    Some(report)
}

fn skip_note(test: &str) {
    eprintln!(
        "Skipping {test}: bundled fonts missing. Set RV_REPORT_FONTS_DIR or copy the \
         Roboto files into assets/fonts (see assets/fonts/README.md)."
    );
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            if let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            {
                let start_index = offset + start_pos + start.len();
                if let Some(end_pos) = data[start_index..]
                    .windows(end.len())
                    .position(|window| window == end)
                {
                    for byte in &mut data[start_index..start_index + end_pos] {
                        if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                            *byte = b'0';
                        }
                    }
                    offset = start_index + end_pos + end.len();
                } else {
                    break;
                }
            } else {
                break;
            }
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    scrub_xml(&mut normalized, b"<xmp:CreateDate>", b"</xmp:CreateDate>");
    scrub_xml(&mut normalized, b"<xmp:ModifyDate>", b"</xmp:ModifyDate>");
    scrub_xml(
        &mut normalized,
        b"<xmp:MetadataDate>",
        b"</xmp:MetadataDate>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:DocumentID>",
        b"</xmpMM:DocumentID>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:InstanceID>",
        b"</xmpMM:InstanceID>",
    );
    scrub_xml(&mut normalized, b"<xmpMM:VersionID>", b"</xmpMM:VersionID>");
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    let digest = Sha256::digest(&normalized);
    digest.into()
}

#[test]
fn renders_non_empty_output() {
    let Some(report) = render_sample_report() else {
        skip_note("renders_non_empty_output");
        return;
    };
    assert!(
        !report.bytes.is_empty(),
        "rendered PDF should contain at least a header"
    );
    assert!(
        report.page_count >= 2,
        "cover plus at least one content page expected, got {}",
        report.page_count
    );
    assert!(report.suggested_filename.starts_with("rv-buyer-report-"));
    assert!(report.suggested_filename.ends_with(".pdf"));
}

#[test]
fn rendering_is_deterministic() {
    let Some(report_a) = render_sample_report() else {
        skip_note("rendering_is_deterministic");
        return;
    };
    let Some(report_b) = render_sample_report() else {
        skip_note("rendering_is_deterministic");
        return;
    };

    assert_eq!(
        report_a.bytes.len(),
        report_b.bytes.len(),
        "PDF sizes should match"
    );

    let hash_a = normalized_hash(&report_a.bytes);
    let hash_b = normalized_hash(&report_b.bytes);

    assert_eq!(
        hash_a, hash_b,
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn empty_lists_still_produce_a_valid_document() {
    if !fonts::default_fonts_available() {
        skip_note("empty_lists_still_produce_a_valid_document");
        return;
    }

    let input = ReportInput::new(
        "A short summary for a buyer with no checklist yet.",
        "A short budget note.",
    );
    let report = ReportPdfBuilder::new()
        .build(&input)
        .expect("render report without list content");

    assert!(report.page_count >= 2);
    assert_eq!(report.section_pages.len(), 4);
    for section in &report.section_pages {
        assert!(
            section.page().is_some(),
            "section '{}' should record a start page",
            section.title()
        );
    }

    let text =
        pdf_extract::extract_text_from_mem(&report.bytes).expect("extract text from report");
    assert!(text.contains("No checklist items were generated"));
    assert!(text.contains("No dealer questions were generated"));
}

#[test]
fn longer_checklists_never_shrink_the_page_count() {
    if !fonts::default_fonts_available() {
        skip_note("longer_checklists_never_shrink_the_page_count");
        return;
    }

    let builder = ReportPdfBuilder::new();
    let base = builder.build(&sample_input()).expect("render base report");

    let mut padded = sample_input();
    for index in 0..24 {
        padded = padded.with_checklist_item(
            ChecklistItem::new("Inspection", format!("Extra inspection point {index}"))
                .with_questions([
                    "Who performed the most recent service on this component?",
                    "Is there documentation for repairs or recalls that touched it?",
                ]),
        );
    }
    let grown = builder.build(&padded).expect("render padded report");

    assert!(
        grown.page_count > base.page_count,
        "24 extra cards should spill onto new pages ({} vs {})",
        grown.page_count,
        base.page_count
    );
}

#[test]
fn oversized_card_splits_without_dropping_or_repeating_questions() {
    if !fonts::default_fonts_available() {
        skip_note("oversized_card_splits_without_dropping_or_repeating_questions");
        return;
    }

    let questions: Vec<String> = (0..60)
        .map(|index| format!("Split probe question number {index:02}, unique marker QX{index:02}?"))
        .collect();
    let input = ReportInput::new("A summary sentence.", "A budget sentence.")
        .with_checklist_item(
            ChecklistItem::new("Inspection", "Oversized walkthrough list")
                .with_priority(Priority::Essential)
                .with_questions(questions.iter().cloned()),
        );

    let report = ReportPdfBuilder::new()
        .build(&input)
        .expect("render report with oversized card");
    assert!(
        report.page_count >= 3,
        "60 question lines must not fit a single content page, got {} pages",
        report.page_count
    );

    let text =
        pdf_extract::extract_text_from_mem(&report.bytes).expect("extract text from report");
    for index in 0..60 {
        let marker = format!("QX{index:02}");
        let occurrences = text.matches(&marker).count();
        assert_eq!(occurrences, 1, "marker {marker} should appear exactly once");
    }

    // Every content page carries exactly one footer, numbered 1..=N with the
    // cover excluded.
    let mut footer_numbers: Vec<usize> = text
        .match_indices("Page ")
        .map(|(index, _)| {
            let digits: String = text[index + "Page ".len()..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().expect("footer page number parses")
        })
        .collect();
    footer_numbers.sort_unstable();
    let expected: Vec<usize> = (1..report.page_count).collect();
    assert_eq!(
        footer_numbers, expected,
        "content pages must carry one strictly increasing footer number each"
    );
}

#[test]
fn section_start_pages_follow_document_order() {
    let Some(report) = render_sample_report() else {
        skip_note("section_start_pages_follow_document_order");
        return;
    };

    let pages: Vec<usize> = report
        .section_pages
        .iter()
        .map(|section| {
            section
                .page()
                .unwrap_or_else(|| panic!("section '{}' records a page", section.title()))
        })
        .collect();

    assert_eq!(pages[0], 2, "executive summary starts on the first content page");
    assert!(
        pages.windows(2).all(|pair| pair[0] <= pair[1]),
        "section start pages must be non-decreasing: {pages:?}"
    );
    assert!(
        pages.iter().all(|page| (2..=report.page_count).contains(page)),
        "section start pages must land on content pages: {pages:?}"
    );
}

#[test]
fn extracted_text_covers_sections_in_priority_order() {
    let Some(report) = render_sample_report() else {
        skip_note("extracted_text_covers_sections_in_priority_order");
        return;
    };

    let text =
        pdf_extract::extract_text_from_mem(&report.bytes).expect("extract text from report");

    for title in [
        "Executive Summary",
        "Budget Considerations",
        "Your RV Technology Checklist",
        "Questions for the Dealer",
    ] {
        assert!(text.contains(title), "missing section title '{title}'");
    }

    for question in [
        "What is the usable capacity in amp hours?",
        "Which carriers does the modem support?",
        "What gauge is the prewired cable run?",
        "Is the warranty transferable to a second owner?",
        "Can the solar prewire handle a 400W array?",
    ] {
        assert!(text.contains(question), "missing question '{question}'");
    }

    // Essential cards must precede Important, which precede Nice to Have.
    let essential = text
        .find("Lithium battery bank")
        .expect("essential card present");
    let important = text.find("Roof solar prewire").expect("important card present");
    let nice = text.find("Smart thermostat").expect("nice-to-have card present");
    assert!(essential < important && important < nice);

    // Footer is stamped on content pages with 1-based numbering.
    assert!(text.contains("Page 1"));
    assert!(text.contains("RV Lifestyle Planner"));
}

#[cfg(feature = "bookmarks")]
#[test]
fn bookmarked_build_preserves_section_pages() {
    if !fonts::default_fonts_available() {
        skip_note("bookmarked_build_preserves_section_pages");
        return;
    }

    let report = ReportPdfBuilder::new()
        .build_with_bookmarks(&sample_input())
        .expect("render bookmarked report");

    assert!(!report.bytes.is_empty());
    assert_eq!(report.section_pages.len(), 4);
    assert!(report
        .section_pages
        .iter()
        .all(|section| section.page().is_some()));
}
