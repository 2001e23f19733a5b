//! Report document assembly: configuration, section composition, pagination,
//! and rendering to PDF bytes.
//!
//! The builder owns the page decorator, which paints the full-bleed cover
//! gradient on the first page, applies margins everywhere, and reserves and
//! stamps the footer band on every content page when the page is allocated.
//! Content therefore can never overdraw a footer, and each page carries
//! exactly one.

use std::cell::Cell;
use std::rc::Rc;

use chrono::Utc;
use genpdf::elements::{Break, PageBreak, Paragraph};
use genpdf::error::{Error, ErrorKind};
use genpdf::style::{Color, Style, StyledString};
use genpdf::{self, Alignment, Element, Margins, Mm, PageDecorator, Position, Size};

use crate::elements::{
    mm_from_f64, mm_to_f64, CardStyle, CheckItemList, ChecklistCard, ReportFooter, SectionHeading,
    SentenceParagraphs,
};
use crate::error::ReportError;
use crate::fonts;
use crate::model::{Priority, ReportInput};
use crate::text;

const SUMMARY_TITLE: &str = "Executive Summary";
const BUDGET_TITLE: &str = "Budget Considerations";
const CHECKLIST_TITLE: &str = "Your RV Technology Checklist";
const DEALER_TITLE: &str = "Questions for the Dealer";

const DEFAULT_TITLE: &str = "RV Buyer Report";
const DEFAULT_ATTRIBUTION: &str = "RV Lifestyle Planner";
const FILENAME_PREFIX: &str = "rv-buyer-report";

const FOOTER_HEIGHT_MM: f64 = 12.0;
const GRADIENT_ROW_STEP_MM: f64 = 0.3;

/// Colors and type sizes applied across the rendered report.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Heading and rule color.
    pub primary: Color,
    /// Body text color.
    pub body_text: Color,
    /// Muted color for category labels, footers, and placeholder notes.
    pub muted: Color,
    /// Checklist card border color.
    pub card_border: Color,
    /// Cover gradient color at the top edge.
    pub cover_top: (u8, u8, u8),
    /// Cover gradient color at the bottom edge.
    pub cover_bottom: (u8, u8, u8),
    /// Text color used on the cover gradient.
    pub cover_text: Color,
    /// Cover title size in points.
    pub title_size: u8,
    /// Section heading size in points.
    pub heading_size: u8,
    /// Body text size in points.
    pub body_size: u8,
    /// Footer text size in points.
    pub footer_size: u8,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(47, 93, 68),
            body_text: Color::Rgb(40, 40, 40),
            muted: Color::Rgb(110, 110, 110),
            card_border: Color::Rgb(170, 180, 174),
            cover_top: (31, 66, 48),
            cover_bottom: (104, 144, 120),
            cover_text: Color::Rgb(248, 248, 244),
            title_size: 28,
            heading_size: 15,
            body_size: 10,
            footer_size: 8,
        }
    }
}

impl Theme {
    /// Returns the tag color for a priority tier.
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Essential => Color::Rgb(166, 58, 47),
            Priority::Important => Color::Rgb(168, 116, 42),
            Priority::NiceToHave => Color::Rgb(58, 101, 140),
        }
    }

    fn styled(&self, size: u8, color: Color, bold: bool) -> Style {
        let mut style = Style::new();
        style.set_font_size(size);
        style.set_color(color);
        if bold {
            style.set_bold();
        }
        style
    }
}

/// Start page recorded for a rendered report section.
#[derive(Clone, Debug)]
pub struct SectionPage {
    title: String,
    page: Option<usize>,
}

impl SectionPage {
    /// Returns the section title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the 1-based page (cover included) the section starts on, if
    /// the section was rendered.
    pub fn page(&self) -> Option<usize> {
        self.page
    }
}

/// Output of a single report build.
#[derive(Clone, Debug)]
pub struct RenderedReport {
    /// The rendered PDF bytes.
    pub bytes: Vec<u8>,
    /// Total number of pages, cover included.
    pub page_count: usize,
    /// Start pages of the report sections, in document order.
    pub section_pages: Vec<SectionPage>,
    /// Download filename with a millisecond timestamp suffix.
    pub suggested_filename: String,
}

/// Builder for RV buyer report documents.
///
/// A builder instance carries only configuration; every [`build`] call
/// creates a fresh document, cursor state, and page counter, so concurrent
/// or repeated builds cannot interfere with each other.
///
/// [`build`]: ReportPdfBuilder::build
pub struct ReportPdfBuilder {
    title: String,
    subtitle: Option<String>,
    attribution: String,
    paper_size: Option<Size>,
    margins: Option<Margins>,
    theme: Theme,
}

impl Default for ReportPdfBuilder {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            subtitle: None,
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            paper_size: None,
            margins: None,
            theme: Theme::default(),
        }
    }
}

impl ReportPdfBuilder {
    /// Creates a builder with the default title, attribution, and theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cover title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets an optional cover subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<Option<String>>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Sets the attribution string stamped into every footer.
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }

    /// Sets the paper size used for new documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the page margins.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Sets the color and type theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Builds the complete report for the given input and renders it to PDF
    /// bytes.
    ///
    /// Section order is fixed: cover, executive summary, budget
    /// considerations, checklist (sorted by priority tier, stable within a
    /// tier), dealer questions.  Empty lists still produce a valid document;
    /// the affected section renders a placeholder note.  On any error no
    /// bytes are returned.
    pub fn build(&self, input: &ReportInput) -> Result<RenderedReport, ReportError> {
        input.validate()?;

        let font_family = fonts::default_font_family()?;
        let mut document = genpdf::Document::new(font_family);
        document.set_title(self.title.clone());
        document.set_font_size(self.theme.body_size);
        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }

        let page_counter = Rc::new(Cell::new(0usize));
        document.set_page_decorator(ReportPageDecorator::new(
            Rc::clone(&page_counter),
            self.margins.unwrap_or_else(default_margins),
            self.footer_spec(),
            self.theme.cover_top,
            self.theme.cover_bottom,
        ));

        self.compose_cover(&mut document);

        let body_style = self
            .theme
            .styled(self.theme.body_size, self.theme.body_text, false);
        let heading_style = self
            .theme
            .styled(self.theme.heading_size, self.theme.primary, true);

        let mut sections = Vec::new();

        let slot = self.compose_narrative(
            &mut document,
            SUMMARY_TITLE,
            input.summary(),
            heading_style,
            body_style,
            &page_counter,
        );
        sections.push((SUMMARY_TITLE.to_string(), slot));

        let slot = self.compose_narrative(
            &mut document,
            BUDGET_TITLE,
            input.budget_considerations(),
            heading_style,
            body_style,
            &page_counter,
        );
        sections.push((BUDGET_TITLE.to_string(), slot));

        let slot =
            self.compose_checklist(&mut document, input, heading_style, body_style, &page_counter);
        sections.push((CHECKLIST_TITLE.to_string(), slot));

        let slot = self.compose_dealer_questions(
            &mut document,
            input,
            heading_style,
            body_style,
            &page_counter,
        );
        sections.push((DEALER_TITLE.to_string(), slot));

        let mut bytes = Vec::new();
        document.render(&mut bytes)?;

        let page_count = page_counter.get();
        log::info!("rendered report with {page_count} pages");

        let section_pages = sections
            .into_iter()
            .map(|(title, slot)| SectionPage {
                title,
                page: slot.get(),
            })
            .collect();

        Ok(RenderedReport {
            bytes,
            page_count,
            section_pages,
            suggested_filename: suggested_filename(),
        })
    }

    /// Builds the report and injects a PDF outline mapping each section to
    /// its start page.
    #[cfg(feature = "bookmarks")]
    pub fn build_with_bookmarks(&self, input: &ReportInput) -> Result<RenderedReport, ReportError> {
        let mut report = self.build(input)?;
        report.bytes =
            crate::bookmarks::apply_section_bookmarks(&report.bytes, &report.section_pages)?;
        Ok(report)
    }

    fn footer_spec(&self) -> FooterSpec {
        let date_line = Utc::now().format("%B %-d, %Y").to_string();
        let attribution = self.attribution.clone();
        let style = self
            .theme
            .styled(self.theme.footer_size, self.theme.muted, false);
        let rule_color = self.theme.card_border;

        FooterSpec {
            height: mm_from_f64(FOOTER_HEIGHT_MM),
            factory: Box::new(move |content_page| {
                Box::new(
                    ReportFooter::new(
                        format!("Generated {date_line} \u{2022} {attribution}"),
                        format!("Page {content_page}"),
                    )
                    .with_style(style)
                    .with_rule_color(rule_color),
                )
            }),
        }
    }

    fn compose_cover(&self, document: &mut genpdf::Document) {
        document.push(Break::new(4.0));

        let title_style = self
            .theme
            .styled(self.theme.title_size, self.theme.cover_text, true);
        let mut title = Paragraph::new(StyledString::new(self.title.clone(), title_style));
        title.set_alignment(Alignment::Center);
        document.push(title);

        if let Some(subtitle) = &self.subtitle {
            document.push(Break::new(0.6));
            let subtitle_style = self
                .theme
                .styled(self.theme.heading_size, self.theme.cover_text, false);
            let mut line = Paragraph::new(StyledString::new(subtitle.clone(), subtitle_style));
            line.set_alignment(Alignment::Center);
            document.push(line);
        }

        document.push(Break::new(2.0));
        let date_style = self
            .theme
            .styled(self.theme.body_size, self.theme.cover_text, false);
        let date_text = format!("Prepared {}", Utc::now().format("%B %-d, %Y"));
        let mut date_line = Paragraph::new(StyledString::new(date_text, date_style));
        date_line.set_alignment(Alignment::Center);
        document.push(date_line);

        document.push(PageBreak::new());
        log::debug!("composed cover page");
    }

    /// Builds a section heading that records the page it is placed on into
    /// the returned slot.
    fn section_heading(
        &self,
        title: &str,
        heading_style: Style,
        page_counter: &Rc<Cell<usize>>,
    ) -> (SectionHeading, Rc<Cell<Option<usize>>>) {
        let slot = Rc::new(Cell::new(None));
        let page = Rc::clone(page_counter);
        let record = Rc::clone(&slot);
        let heading = SectionHeading::new(title)
            .with_style(heading_style)
            .with_rule_color(self.theme.primary)
            .with_placement_hook(move || record.set(Some(page.get())));
        (heading, slot)
    }

    fn compose_narrative(
        &self,
        document: &mut genpdf::Document,
        title: &str,
        narrative: &str,
        heading_style: Style,
        body_style: Style,
        page_counter: &Rc<Cell<usize>>,
    ) -> Rc<Cell<Option<usize>>> {
        let (heading, slot) = self.section_heading(title, heading_style, page_counter);
        document.push(heading);
        document.push(Break::new(0.5));
        document.push(
            SentenceParagraphs::new(text::split_sentences(narrative)).with_style(body_style),
        );
        document.push(Break::new(1.2));
        log::debug!("composed narrative section '{title}'");
        slot
    }

    fn compose_checklist(
        &self,
        document: &mut genpdf::Document,
        input: &ReportInput,
        heading_style: Style,
        body_style: Style,
        page_counter: &Rc<Cell<usize>>,
    ) -> Rc<Cell<Option<usize>>> {
        let (heading, slot) = self.section_heading(CHECKLIST_TITLE, heading_style, page_counter);
        document.push(heading);
        document.push(Break::new(0.5));

        let items = input.sorted_checklist();
        if items.is_empty() {
            document
                .push(self.placeholder_note("No checklist items were generated for this plan."));
            document.push(Break::new(1.2));
            return slot;
        }

        for item in items {
            let mut card_style = CardStyle {
                body: body_style,
                border_color: self.theme.card_border,
                ..CardStyle::default()
            };
            card_style.category.set_color(self.theme.muted);
            card_style.title.set_color(self.theme.body_text);
            card_style
                .priority
                .set_color(self.theme.priority_color(item.priority()));

            document.push(ChecklistCard::new(item.clone(), card_style));
            document.push(Break::new(0.8));
        }
        document.push(Break::new(0.4));
        log::debug!(
            "composed checklist section with {} cards",
            input.checklist_items().len()
        );
        slot
    }

    fn compose_dealer_questions(
        &self,
        document: &mut genpdf::Document,
        input: &ReportInput,
        heading_style: Style,
        body_style: Style,
        page_counter: &Rc<Cell<usize>>,
    ) -> Rc<Cell<Option<usize>>> {
        let (heading, slot) = self.section_heading(DEALER_TITLE, heading_style, page_counter);
        document.push(heading);
        document.push(Break::new(0.5));

        if input.dealer_questions().is_empty() {
            document
                .push(self.placeholder_note("No dealer questions were generated for this plan."));
            return slot;
        }

        document.push(
            CheckItemList::new(input.dealer_questions().iter().cloned())
                .with_style(body_style)
                .with_box_color(self.theme.muted),
        );
        log::debug!(
            "composed dealer question section with {} entries",
            input.dealer_questions().len()
        );
        slot
    }

    fn placeholder_note(&self, note: &str) -> Paragraph {
        let style = self
            .theme
            .styled(self.theme.body_size, self.theme.muted, false);
        Paragraph::new(StyledString::new(note.to_string(), style))
    }
}

/// Returns the download filename for a report built now.
fn suggested_filename() -> String {
    format!("{FILENAME_PREFIX}-{}.pdf", Utc::now().timestamp_millis())
}

fn default_margins() -> Margins {
    Margins::trbl(
        mm_from_f64(18.0),
        mm_from_f64(16.0),
        mm_from_f64(16.0),
        mm_from_f64(16.0),
    )
}

/// Definition of the footer band rendered through the page decorator.
struct FooterSpec {
    height: Mm,
    factory: Box<dyn Fn(usize) -> Box<dyn Element>>,
}

/// Page decorator for report documents.
///
/// Counts pages, paints the cover gradient on page 1, applies margins on
/// every page, and on content pages reserves the footer band and stamps the
/// footer while the page is allocated.
struct ReportPageDecorator {
    page: Rc<Cell<usize>>,
    margins: Margins,
    footer: FooterSpec,
    cover_top: (u8, u8, u8),
    cover_bottom: (u8, u8, u8),
}

impl ReportPageDecorator {
    fn new(
        page: Rc<Cell<usize>>,
        margins: Margins,
        footer: FooterSpec,
        cover_top: (u8, u8, u8),
        cover_bottom: (u8, u8, u8),
    ) -> Self {
        Self {
            page,
            margins,
            footer,
            cover_top,
            cover_bottom,
        }
    }
}

impl PageDecorator for ReportPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        let page = self.page.get() + 1;
        self.page.set(page);

        if page == 1 {
            draw_cover_gradient(&area, self.cover_top, self.cover_bottom);
        }

        area.add_margins(self.margins);

        if page > 1 {
            let available = area.size().height;
            if self.footer.height > available {
                return Err(Error::new(
                    "Footer height exceeds available space",
                    ErrorKind::InvalidData,
                ));
            }

            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - self.footer.height));
            let mut footer = (self.footer.factory)(page - 1);
            let result = footer.render(context, footer_area, style)?;
            if result.has_more {
                return Err(Error::new(
                    "Footer element does not fit into the reserved space",
                    ErrorKind::PageSizeExceeded,
                ));
            }

            area.set_height(available - self.footer.height);
        }

        Ok(area)
    }
}

/// Paints a full-bleed vertical gradient by drawing one horizontal line per
/// row, interpolating the color between the two anchors.
fn draw_cover_gradient(area: &genpdf::render::Area<'_>, top: (u8, u8, u8), bottom: (u8, u8, u8)) {
    let height = mm_to_f64(area.size().height);
    let width = area.size().width;
    let rows = (height / GRADIENT_ROW_STEP_MM).ceil().max(1.0) as usize;

    for row in 0..=rows {
        let t = row as f64 / rows as f64;
        let mut style = Style::new();
        style.set_color(Color::Rgb(
            lerp_channel(top.0, bottom.0, t),
            lerp_channel(top.1, bottom.1, t),
            lerp_channel(top.2, bottom.2, t),
        ));
        let y = mm_from_f64((row as f64 * GRADIENT_ROW_STEP_MM).min(height));
        area.draw_line(vec![Position::new(0, y), Position::new(width, y)], style);
    }
}

fn lerp_channel(start: u8, end: u8, t: f64) -> u8 {
    (start as f64 + (end as f64 - start as f64) * t)
        .round()
        .clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::{lerp_channel, suggested_filename, ReportPdfBuilder};
    use crate::model::ReportInput;

    #[test]
    fn malformed_input_is_rejected_before_rendering() {
        let builder = ReportPdfBuilder::new();
        let input = ReportInput::new("", "Budget.");
        // Fails validation regardless of whether fonts are installed.
        assert!(builder.build(&input).is_err());
    }

    #[test]
    fn suggested_filename_has_prefix_and_extension() {
        let name = suggested_filename();
        assert!(name.starts_with("rv-buyer-report-"));
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn gradient_interpolation_hits_both_anchors() {
        assert_eq!(lerp_channel(10, 200, 0.0), 10);
        assert_eq!(lerp_channel(10, 200, 1.0), 200);
        assert_eq!(lerp_channel(0, 255, 0.5), 128);
    }
}
