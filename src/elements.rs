//! Custom element implementations built on top of `genpdf` primitives.
//!
//! This module contains the report's visual building blocks: sentence-unit
//! paragraphs, section headings with rules, bordered checklist cards, checkbox
//! lists, and the page footer band.  Each element measures its text through
//! the font cache, places lines one at a time, and keeps an explicit
//! continuation cursor so a block interrupted by a page break resumes on the
//! next page without losing or repeating a line.

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::FontCache;
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Element, Mm, Position, RenderResult, Size};

use crate::model::ChecklistItem;
use crate::text::wrap_words;

const HEADING_RULE_GAP_MM: f64 = 1.2;
const HEADING_RULE_CLEARANCE_MM: f64 = 1.0;
const FOOTER_RULE_GAP_MM: f64 = 1.5;
const CHECKBOX_TEXT_GAP_MM: f64 = 2.2;
const DEFAULT_PARAGRAPH_GAP_MM: f64 = 1.6;
const DEFAULT_ITEM_GAP_MM: f64 = 1.4;
const DEFAULT_CARD_PADDING_MM: f64 = 3.0;
const DEFAULT_CHECKBOX_MM: f64 = 2.8;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Caps a consumed height at the area height so a trailing paragraph gap can
/// never report an oversized render result.
fn clamp_height(consumed: Mm, available: Mm) -> Mm {
    if consumed > available {
        available
    } else {
        consumed
    }
}

/// Measures rendered string widths (in millimetres) for a fixed style.
fn measure_with<'c>(font_cache: &'c FontCache, style: Style) -> impl Fn(&str) -> f64 + 'c {
    move |text: &str| {
        let styled = StyledString::new(text.to_string(), style);
        mm_to_f64(styled.width(font_cache))
    }
}

fn print_line(
    area: &mut render::Area<'_>,
    font_cache: &FontCache,
    position: Position,
    text: &str,
    style: Style,
) -> Result<bool, Error> {
    if let Some(mut section) = area.text_section(font_cache, position, style) {
        section.print_str(text, style)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

fn draw_box(area: &render::Area<'_>, origin: Position, width: Mm, height: Mm, color: Color) {
    let mut style = Style::new();
    style.set_color(color);
    area.draw_line(
        vec![
            Position::new(origin.x, origin.y),
            Position::new(origin.x + width, origin.y),
            Position::new(origin.x + width, origin.y + height),
            Position::new(origin.x, origin.y + height),
            Position::new(origin.x, origin.y),
        ],
        style,
    );
}

/// Renders pre-split sentence units as paragraph blocks.
///
/// Every sentence is wrapped independently to the available width and treated
/// as one paragraph for spacing: lines within a sentence sit at the style's
/// line height, consecutive sentences are separated by the configured gap.
/// The element re-checks the remaining height before each line, so a long
/// narrative flows across page breaks one display line at a time.
pub struct SentenceParagraphs {
    sentences: Vec<String>,
    style: Style,
    paragraph_gap: Mm,
    next_sentence: usize,
    next_line: usize,
}

impl SentenceParagraphs {
    /// Creates a paragraph block from sentence units.
    pub fn new<I, S>(sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sentences: sentences.into_iter().map(Into::into).collect(),
            style: Style::new(),
            paragraph_gap: mm_from_f64(DEFAULT_PARAGRAPH_GAP_MM),
            next_sentence: 0,
            next_line: 0,
        }
    }

    /// Sets the text style and returns the updated element.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Sets the vertical gap between sentence units and returns the updated
    /// element.
    pub fn with_paragraph_gap(mut self, gap: Mm) -> Self {
        self.paragraph_gap = gap;
        self
    }
}

impl Element for SentenceParagraphs {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let style = style.and(self.style);
        let width = area.size().width;
        let max_height = area.size().height;
        let line_height = style.line_height(&context.font_cache);
        let wrap_width = mm_to_f64(width);

        let mut result = RenderResult::default();
        let mut y = Mm::default();

        while self.next_sentence < self.sentences.len() {
            let lines = {
                let measure = measure_with(&context.font_cache, style);
                wrap_words(&self.sentences[self.next_sentence], wrap_width, measure)
            };

            while self.next_line < lines.len() {
                if y + line_height > max_height {
                    result.has_more = true;
                    result.size = Size::new(width, clamp_height(y, max_height));
                    return Ok(result);
                }
                let printed = print_line(
                    &mut area,
                    &context.font_cache,
                    Position::new(0, y),
                    &lines[self.next_line],
                    style,
                )?;
                if !printed {
                    result.has_more = true;
                    result.size = Size::new(width, clamp_height(y, max_height));
                    return Ok(result);
                }
                y += line_height;
                self.next_line += 1;
            }

            self.next_line = 0;
            self.next_sentence += 1;
            if self.next_sentence < self.sentences.len() {
                y += self.paragraph_gap;
            }
        }

        result.size = Size::new(width, clamp_height(y, max_height));
        Ok(result)
    }
}

/// A one-line section heading with an underline rule.
///
/// The heading is an atomic block: if the line plus its rule does not fit the
/// remaining page height, the whole heading moves to the next page.
pub struct SectionHeading {
    text: String,
    style: Style,
    rule_color: Color,
    on_placed: Option<Box<dyn FnMut()>>,
}

impl SectionHeading {
    /// Creates a heading with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        let mut style = Style::new();
        style.set_bold();
        Self {
            text: text.into(),
            style,
            rule_color: Color::Rgb(120, 120, 120),
            on_placed: None,
        }
    }

    /// Registers a hook invoked once, when the heading is actually placed on
    /// a page.  Placement happens after any page break the heading itself
    /// triggers, so the hook observes the page the heading ends up on.
    pub fn with_placement_hook(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_placed = Some(Box::new(hook));
        self
    }

    /// Sets the heading style and returns the updated element.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Sets the rule color and returns the updated element.
    pub fn with_rule_color(mut self, color: Color) -> Self {
        self.rule_color = color;
        self
    }
}

impl Element for SectionHeading {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let style = style.and(self.style);
        let width = area.size().width;
        let line_height = style.line_height(&context.font_cache);
        let rule_y = line_height + mm_from_f64(HEADING_RULE_GAP_MM);
        let total = rule_y + mm_from_f64(HEADING_RULE_CLEARANCE_MM);

        let mut result = RenderResult::default();
        if total > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let printed = print_line(
            &mut area,
            &context.font_cache,
            Position::new(0, 0),
            &self.text,
            style,
        )?;
        if !printed {
            result.has_more = true;
            return Ok(result);
        }

        if let Some(mut hook) = self.on_placed.take() {
            hook();
        }

        let mut rule_style = Style::new();
        rule_style.set_color(self.rule_color);
        area.draw_line(
            vec![Position::new(0, rule_y), Position::new(width, rule_y)],
            rule_style,
        );

        result.size = Size::new(width, total);
        Ok(result)
    }
}

/// Styling bundle for [`ChecklistCard`].
#[derive(Clone, Copy, Debug)]
pub struct CardStyle {
    /// Style for the uppercased category label.
    pub category: Style,
    /// Style for the item title.
    pub title: Style,
    /// Style for the priority tag line.
    pub priority: Style,
    /// Style for question lines.
    pub body: Style,
    /// Border color for the card box and checkboxes.
    pub border_color: Color,
    /// Inner padding between the border and the text, in millimetres.
    pub padding_mm: f64,
    /// Checkbox edge length, in millimetres.
    pub checkbox_mm: f64,
}

impl Default for CardStyle {
    fn default() -> Self {
        let mut category = Style::new();
        category.set_font_size(8);
        category.set_color(Color::Rgb(110, 110, 110));

        let mut title = Style::new();
        title.set_bold();
        title.set_font_size(12);

        let mut priority = Style::new();
        priority.set_font_size(9);
        priority.set_italic();

        let mut body = Style::new();
        body.set_font_size(10);

        Self {
            category,
            title,
            priority,
            body,
            border_color: Color::Rgb(180, 180, 180),
            padding_mm: DEFAULT_CARD_PADDING_MM,
            checkbox_mm: DEFAULT_CHECKBOX_MM,
        }
    }
}

/// One planned display line inside a checklist card.
#[derive(Clone, Debug, PartialEq)]
pub enum CardLine {
    /// A wrapped line of the uppercased category label.
    Category(String),
    /// A wrapped line of the item title.
    Title(String),
    /// The priority tag.
    Priority(String),
    /// The first wrapped line of a question; carries the checkbox.
    QuestionStart(String),
    /// A continuation line of a wrapped question.
    QuestionCont(String),
}

/// Content widths (in millimetres) available to [`plan_card_lines`].
#[derive(Clone, Copy, Debug)]
pub struct CardWidths {
    /// Width for category, priority, and other full-width lines.
    pub body: f64,
    /// Width for title lines.
    pub title: f64,
    /// Width for question text, after the checkbox indent.
    pub question: f64,
}

/// Plans the complete line sequence of a checklist card.
///
/// Pure layout math over the injected measure closures; the card element
/// feeds it font-cache measurements, the unit tests feed it character counts.
/// The plan is computed once per card and then consumed incrementally, which
/// is what guarantees that a card split across pages never drops or repeats a
/// line.
pub fn plan_card_lines(
    item: &ChecklistItem,
    widths: &CardWidths,
    measure_title: &dyn Fn(&str) -> f64,
    measure_body: &dyn Fn(&str) -> f64,
) -> Vec<CardLine> {
    let mut lines = Vec::new();

    for line in wrap_words(&item.category().to_uppercase(), widths.body, measure_body) {
        lines.push(CardLine::Category(line));
    }
    for line in wrap_words(item.item(), widths.title, measure_title) {
        lines.push(CardLine::Title(line));
    }
    lines.push(CardLine::Priority(item.priority().label().to_string()));
    for question in item.questions() {
        let mut first = true;
        for line in wrap_words(question, widths.question, measure_body) {
            if first {
                lines.push(CardLine::QuestionStart(line));
                first = false;
            } else {
                lines.push(CardLine::QuestionCont(line));
            }
        }
    }

    lines
}

/// A bordered card rendering one checklist item.
///
/// The card measures its lines first, decides how many fit in the remaining
/// height, draws the border box sized to exactly that segment, and only then
/// prints the text, so the decoration always sits behind the content and
/// matches the content placed on each page.
pub struct ChecklistCard {
    item: ChecklistItem,
    style: CardStyle,
    planned: Option<Vec<CardLine>>,
    next_line: usize,
}

impl ChecklistCard {
    /// Creates a card for the given checklist item.
    pub fn new(item: ChecklistItem, style: CardStyle) -> Self {
        Self {
            item,
            style,
            planned: None,
            next_line: 0,
        }
    }
}

impl Element for ChecklistCard {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let category_style = style.and(self.style.category);
        let title_style = style.and(self.style.title);
        let priority_style = style.and(self.style.priority);
        let body_style = style.and(self.style.body);

        let width = area.size().width;
        let padding = mm_from_f64(self.style.padding_mm);
        let checkbox = mm_from_f64(self.style.checkbox_mm);
        let indent = checkbox + mm_from_f64(CHECKBOX_TEXT_GAP_MM);
        let inner_width = mm_to_f64(width - padding - padding);

        let lines: Vec<CardLine> = self
            .planned
            .get_or_insert_with(|| {
                let measure_title = measure_with(&context.font_cache, title_style);
                let measure_body = measure_with(&context.font_cache, body_style);
                let widths = CardWidths {
                    body: inner_width,
                    title: inner_width,
                    question: inner_width - mm_to_f64(indent),
                };
                plan_card_lines(&self.item, &widths, &measure_title, &measure_body)
            })
            .clone();

        let height_of = |line: &CardLine| -> Mm {
            match line {
                CardLine::Category(_) => category_style.line_height(&context.font_cache),
                CardLine::Title(_) => title_style.line_height(&context.font_cache),
                CardLine::Priority(_) => priority_style.line_height(&context.font_cache),
                CardLine::QuestionStart(_) | CardLine::QuestionCont(_) => {
                    body_style.line_height(&context.font_cache)
                }
            }
        };

        let max_height = area.size().height;
        let mut segment_height = padding + padding;
        let mut fit = 0;
        for line in &lines[self.next_line..] {
            let line_height = height_of(line);
            if segment_height + line_height > max_height {
                break;
            }
            segment_height += line_height;
            fit += 1;
        }

        let mut result = RenderResult::default();
        if fit == 0 {
            // Not even one line fits; retry on a fresh page.
            result.has_more = true;
            return Ok(result);
        }

        draw_box(
            &area,
            Position::new(0, 0),
            width,
            segment_height,
            self.style.border_color,
        );

        let mut y = padding;
        for line in &lines[self.next_line..self.next_line + fit] {
            let line_height = height_of(line);
            let (text, line_style, x) = match line {
                CardLine::Category(text) => (text, category_style, padding),
                CardLine::Title(text) => (text, title_style, padding),
                CardLine::Priority(text) => (text, priority_style, padding),
                CardLine::QuestionStart(text) => {
                    let inset = (line_height - checkbox) / 2.0;
                    draw_box(
                        &area,
                        Position::new(padding, y + inset),
                        checkbox,
                        checkbox,
                        self.style.border_color,
                    );
                    (text, body_style, padding + indent)
                }
                CardLine::QuestionCont(text) => (text, body_style, padding + indent),
            };

            let printed = print_line(
                &mut area,
                &context.font_cache,
                Position::new(x, y),
                text,
                line_style,
            )?;
            if !printed {
                return Err(Error::new(
                    "Checklist card line exceeded its measured segment",
                    ErrorKind::PageSizeExceeded,
                ));
            }
            y += line_height;
        }

        self.next_line += fit;
        result.has_more = self.next_line < lines.len();
        if result.has_more {
            log::trace!(
                "checklist card '{}' continues on a new page",
                self.item.item()
            );
        }
        result.size = Size::new(width, segment_height);
        Ok(result)
    }
}

/// Plans checkbox-list lines: each entry is a display line paired with a flag
/// marking the first line of an item (which carries the checkbox).
pub fn plan_check_lines(
    items: &[String],
    width: f64,
    measure: &dyn Fn(&str) -> f64,
) -> Vec<(String, bool)> {
    let mut lines = Vec::new();
    for item in items {
        let mut first = true;
        for line in wrap_words(item, width, measure) {
            lines.push((line, first));
            first = false;
        }
    }
    lines
}

/// A flat checkbox list, one entry per dealer question.
///
/// Unlike [`ChecklistCard`] the list has no border and may break between any
/// two lines; the continuation cursor keeps every question rendered exactly
/// once across page breaks.
pub struct CheckItemList {
    items: Vec<String>,
    style: Style,
    box_color: Color,
    checkbox_mm: f64,
    item_gap: Mm,
    planned: Option<Vec<(String, bool)>>,
    next_line: usize,
}

impl CheckItemList {
    /// Creates a checkbox list from the given entries.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            style: Style::new(),
            box_color: Color::Rgb(120, 120, 120),
            checkbox_mm: DEFAULT_CHECKBOX_MM,
            item_gap: mm_from_f64(DEFAULT_ITEM_GAP_MM),
            planned: None,
            next_line: 0,
        }
    }

    /// Sets the text style and returns the updated element.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Sets the checkbox color and returns the updated element.
    pub fn with_box_color(mut self, color: Color) -> Self {
        self.box_color = color;
        self
    }

    /// Sets the vertical gap between items and returns the updated element.
    pub fn with_item_gap(mut self, gap: Mm) -> Self {
        self.item_gap = gap;
        self
    }
}

impl Element for CheckItemList {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let style = style.and(self.style);
        let width = area.size().width;
        let max_height = area.size().height;
        let line_height = style.line_height(&context.font_cache);
        let checkbox = mm_from_f64(self.checkbox_mm);
        let indent = checkbox + mm_from_f64(CHECKBOX_TEXT_GAP_MM);

        let lines: Vec<(String, bool)> = self
            .planned
            .get_or_insert_with(|| {
                let measure = measure_with(&context.font_cache, style);
                let wrap_width = mm_to_f64(width - indent);
                plan_check_lines(&self.items, wrap_width, &measure)
            })
            .clone();

        let mut result = RenderResult::default();
        let mut y = Mm::default();
        let mut first_in_pass = true;

        while self.next_line < lines.len() {
            let (text, starts_item) = &lines[self.next_line];
            let gap = if *starts_item && !first_in_pass {
                self.item_gap
            } else {
                Mm::default()
            };
            if y + gap + line_height > max_height {
                result.has_more = true;
                break;
            }
            let line_top = y + gap;

            if *starts_item {
                let inset = (line_height - checkbox) / 2.0;
                draw_box(
                    &area,
                    Position::new(0, line_top + inset),
                    checkbox,
                    checkbox,
                    self.box_color,
                );
            }
            let printed = print_line(
                &mut area,
                &context.font_cache,
                Position::new(indent, line_top),
                text,
                style,
            )?;
            if !printed {
                result.has_more = true;
                break;
            }

            y = line_top + line_height;
            first_in_pass = false;
            self.next_line += 1;
        }

        result.size = Size::new(width, clamp_height(y, max_height));
        Ok(result)
    }
}

/// The per-page footer band: a rule, a left-aligned date and attribution
/// line, and a right-aligned page number.
pub struct ReportFooter {
    left: String,
    right: String,
    style: Style,
    rule_color: Color,
}

impl ReportFooter {
    /// Creates a footer with the given left and right texts.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        let mut style = Style::new();
        style.set_font_size(8);
        style.set_color(Color::Rgb(110, 110, 110));
        Self {
            left: left.into(),
            right: right.into(),
            style,
            rule_color: Color::Rgb(180, 180, 180),
        }
    }

    /// Sets the footer text style and returns the updated element.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Sets the rule color and returns the updated element.
    pub fn with_rule_color(mut self, color: Color) -> Self {
        self.rule_color = color;
        self
    }
}

impl Element for ReportFooter {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let style = style.and(self.style);
        let width = area.size().width;
        let line_height = style.line_height(&context.font_cache);
        let text_y = mm_from_f64(FOOTER_RULE_GAP_MM);
        let total = text_y + line_height;

        let mut result = RenderResult::default();
        if total > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let mut rule_style = Style::new();
        rule_style.set_color(self.rule_color);
        area.draw_line(
            vec![Position::new(0, 0), Position::new(width, 0)],
            rule_style,
        );

        print_line(
            &mut area,
            &context.font_cache,
            Position::new(0, text_y),
            &self.left,
            style,
        )?;

        let right_width = StyledString::new(self.right.clone(), style).width(&context.font_cache);
        let right_x = if right_width < width {
            width - right_width
        } else {
            Mm::default()
        };
        print_line(
            &mut area,
            &context.font_cache,
            Position::new(right_x, text_y),
            &self.right,
            style,
        )?;

        result.size = Size::new(width, total);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::{plan_card_lines, plan_check_lines, CardLine, CardWidths};
    use crate::model::{ChecklistItem, Priority};

    fn char_count(line: &str) -> f64 {
        line.chars().count() as f64
    }

    #[test]
    fn card_plan_orders_header_before_questions() {
        let item = ChecklistItem::new("Power", "Solar setup")
            .with_priority(Priority::Essential)
            .with_question("What is the panel wattage?");
        let widths = CardWidths {
            body: 100.0,
            title: 100.0,
            question: 100.0,
        };

        let lines = plan_card_lines(&item, &widths, &char_count, &char_count);
        assert_eq!(
            lines,
            [
                CardLine::Category("POWER".into()),
                CardLine::Title("Solar setup".into()),
                CardLine::Priority("Essential".into()),
                CardLine::QuestionStart("What is the panel wattage?".into()),
            ]
        );
    }

    #[test]
    fn card_plan_marks_question_continuations() {
        let item = ChecklistItem::new("Power", "Solar")
            .with_question("one two three four five six seven eight");
        let widths = CardWidths {
            body: 100.0,
            title: 100.0,
            question: 14.0,
        };

        let lines = plan_card_lines(&item, &widths, &char_count, &char_count);
        let starts = lines
            .iter()
            .filter(|line| matches!(line, CardLine::QuestionStart(_)))
            .count();
        let conts = lines
            .iter()
            .filter(|line| matches!(line, CardLine::QuestionCont(_)))
            .count();
        assert_eq!(starts, 1, "one checkbox per question");
        assert!(conts >= 1, "long question wraps to continuation lines");

        let rejoined: Vec<String> = lines
            .iter()
            .filter_map(|line| match line {
                CardLine::QuestionStart(text) | CardLine::QuestionCont(text) => {
                    Some(text.clone())
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            rejoined.join(" "),
            "one two three four five six seven eight"
        );
    }

    #[test]
    fn card_plan_without_questions_still_has_header_lines() {
        let item = ChecklistItem::new("Comfort", "Awning");
        let widths = CardWidths {
            body: 100.0,
            title: 100.0,
            question: 100.0,
        };

        let lines = plan_card_lines(&item, &widths, &char_count, &char_count);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn check_list_plan_flags_first_line_of_each_item() {
        let items = vec![
            "Is the warranty transferable?".to_string(),
            "short".to_string(),
        ];
        let lines = plan_check_lines(&items, 12.0, &char_count);

        let firsts = lines.iter().filter(|(_, first)| *first).count();
        assert_eq!(firsts, items.len());
        assert!(lines.len() > items.len(), "long question wraps");
        assert!(lines[0].1, "plan starts at an item boundary");
    }
}
