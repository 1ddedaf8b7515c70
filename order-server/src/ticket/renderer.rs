//! Order ticket renderer
//!
//! Renders one sub-order into a fixed-width ticket byte payload: client
//! block, item table, total, and a scannable tracking token. Pure and
//! deterministic for identical inputs; workflow state never leaks in.

use krill_ticket::{TicketBuilder, TicketError, TicketResult, cp866_width, pad_cp866, wrap_cp866};
use shared::models::OrderItem;

use crate::i18n::format_money;

/// Narrowest layout that still fits the item table columns
const MIN_WIDTH: usize = 32;

/// QR payload budget (model 2, error correction L)
const MAX_QR_BYTES: usize = 700;

/// Rendering input: everything a document shows, nothing more
#[derive(Debug, Clone)]
pub struct TicketJob<'a> {
    pub order_id: &'a str,
    pub client_name: &'a str,
    pub client_phone: &'a str,
    pub client_address: &'a str,
    pub items: &'a [OrderItem],
    pub total: f64,
    /// Embedded verbatim in the QR code, e.g. `ORDER:ORD-…-P1`
    pub tracking_token: &'a str,
}

/// Vertical cursor and font state, carried across segment breaks
struct PageCursor {
    line: usize,
    budget: usize,
    doubled: bool,
    emphasized: bool,
}

/// Order ticket renderer
///
/// `width` is the paper width in characters (48 for 80mm paper);
/// `page_lines` is the per-segment line budget before a break.
pub struct OrderTicketRenderer {
    width: usize,
    page_lines: usize,
}

impl OrderTicketRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            page_lines: 48,
        }
    }

    /// Override the per-segment line budget
    pub fn with_page_lines(mut self, page_lines: usize) -> Self {
        self.page_lines = page_lines;
        self
    }

    /// Render a sub-order document to ticket bytes
    pub fn render(&self, job: &TicketJob<'_>) -> TicketResult<Vec<u8>> {
        if self.width < MIN_WIDTH {
            return Err(TicketError::InvalidWidth {
                width: self.width,
                min: MIN_WIDTH,
            });
        }
        if job.items.is_empty() {
            return Err(TicketError::EmptyItems);
        }
        if job.tracking_token.len() > MAX_QR_BYTES {
            return Err(TicketError::TokenTooLong {
                len: job.tracking_token.len(),
                max: MAX_QR_BYTES,
            });
        }

        let mut b = TicketBuilder::new(self.width);
        let mut cur = PageCursor {
            line: 0,
            budget: self.page_lines.max(8),
            doubled: false,
            emphasized: false,
        };

        self.render_header(&mut b, &mut cur, job);
        self.render_client(&mut b, &mut cur, job);
        self.render_items(&mut b, &mut cur, job);
        self.render_total(&mut b, &mut cur, job);
        self.render_token(&mut b, &mut cur, job);

        b.cut();
        Ok(b.build())
    }

    // === Sections ===

    fn render_header(&self, b: &mut TicketBuilder, cur: &mut PageCursor, job: &TicketJob<'_>) {
        b.center();
        self.set_doubled(b, cur, true);
        self.set_emphasized(b, cur, true);
        self.write_line(b, cur, job, &format!("Заказ №{}", job.order_id));
        self.set_emphasized(b, cur, false);
        self.set_doubled(b, cur, false);
        b.left();
        self.write_sep_double(b, cur, job);
    }

    fn render_client(&self, b: &mut TicketBuilder, cur: &mut PageCursor, job: &TicketJob<'_>) {
        self.set_emphasized(b, cur, true);
        self.write_line(b, cur, job, "Информация о клиенте:");
        self.set_emphasized(b, cur, false);

        self.write_line(b, cur, job, &format!("Имя: {}", job.client_name));
        self.write_line(b, cur, job, &format!("Телефон: {}", job.client_phone));
        // Long free text wraps, nothing is truncated away
        for line in wrap_cp866(&format!("Адрес: {}", job.client_address), self.width) {
            self.write_line(b, cur, job, &line);
        }
        self.write_sep_single(b, cur, job);
    }

    fn render_items(&self, b: &mut TicketBuilder, cur: &mut PageCursor, job: &TicketJob<'_>) {
        self.set_emphasized(b, cur, true);
        self.write_line(b, cur, job, "Товары:");
        self.set_emphasized(b, cur, false);

        let name_col = self.name_column();
        let header = format!(
            "{}{}{}{}{}",
            pad_cp866("№", 3, false),
            pad_cp866("Название", name_col, false),
            pad_cp866("Кол", 4, true),
            pad_cp866("Цена", 8, true),
            pad_cp866("Сумма", 9, true),
        );
        self.write_line(b, cur, job, &header);
        self.write_sep_single(b, cur, job);

        for (idx, item) in job.items.iter().enumerate() {
            let name_lines = wrap_cp866(&item.name, name_col);
            let first = name_lines.first().map(String::as_str).unwrap_or("");

            let row = format!(
                "{}{}{}{}{}",
                pad_cp866(&format!("{}", idx + 1), 3, false),
                pad_cp866(first, name_col, false),
                pad_cp866(&item.quantity.to_string(), 4, true),
                pad_cp866(&format_money(item.price), 8, true),
                pad_cp866(&format_money(item.subtotal()), 9, true),
            );
            self.write_line(b, cur, job, &row);

            // Wrapped continuation of the item name, indented under the column
            for extra in name_lines.iter().skip(1) {
                self.write_line(b, cur, job, &format!("   {extra}"));
            }
        }
    }

    fn render_total(&self, b: &mut TicketBuilder, cur: &mut PageCursor, job: &TicketJob<'_>) {
        self.write_sep_single(b, cur, job);
        self.set_emphasized(b, cur, true);
        let right = format!("{} сум", format_money(job.total));
        let left = "Итого:";
        let gap = self
            .width
            .saturating_sub(cp866_width(left) + cp866_width(&right))
            .max(1);
        self.write_line(b, cur, job, &format!("{left}{}{right}", " ".repeat(gap)));
        self.set_emphasized(b, cur, false);
    }

    fn render_token(&self, b: &mut TicketBuilder, cur: &mut PageCursor, job: &TicketJob<'_>) {
        // Keep the QR and its hint on one segment
        if cur.line + 8 > cur.budget {
            self.break_page(b, cur, job);
        }
        b.newline();
        cur.line += 1;
        b.qr_code(job.tracking_token, 4);
        cur.line += 6;
        self.write_line(b, cur, job, "Отсканируйте QR-код");
        self.write_line(b, cur, job, "для отслеживания заказа");
    }

    // === Cursor-aware primitives ===

    fn name_column(&self) -> usize {
        self.width - 3 - 4 - 8 - 9
    }

    fn line_advance(cur: &PageCursor) -> usize {
        if cur.doubled { 2 } else { 1 }
    }

    fn write_line(&self, b: &mut TicketBuilder, cur: &mut PageCursor, job: &TicketJob<'_>, s: &str) {
        if cur.line + Self::line_advance(cur) > cur.budget {
            self.break_page(b, cur, job);
        }
        b.line(s);
        cur.line += Self::line_advance(cur);
    }

    fn write_sep_double(&self, b: &mut TicketBuilder, cur: &mut PageCursor, job: &TicketJob<'_>) {
        self.write_line(b, cur, job, &"=".repeat(self.width));
    }

    fn write_sep_single(&self, b: &mut TicketBuilder, cur: &mut PageCursor, job: &TicketJob<'_>) {
        self.write_line(b, cur, job, &"-".repeat(self.width));
    }

    fn set_doubled(&self, b: &mut TicketBuilder, cur: &mut PageCursor, on: bool) {
        if on {
            b.double_size();
        } else {
            b.reset_size();
        }
        cur.doubled = on;
    }

    fn set_emphasized(&self, b: &mut TicketBuilder, cur: &mut PageCursor, on: bool) {
        if on {
            b.bold();
        } else {
            b.bold_off();
        }
        cur.emphasized = on;
    }

    /// Segment break: cut, continuation header, then restore the font
    /// state that was active when the break happened.
    fn break_page(&self, b: &mut TicketBuilder, cur: &mut PageCursor, job: &TicketJob<'_>) {
        let doubled = cur.doubled;
        let emphasized = cur.emphasized;

        b.reset_size();
        b.bold_off();
        b.feed(2);
        b.cut_partial();

        b.double_height();
        b.line(&format!(">> {}", job.order_id));
        b.reset_size();
        cur.line = 2;

        // Re-apply the interrupted font state
        if doubled {
            b.double_size();
        }
        if emphasized {
            b.bold();
        }
        cur.doubled = doubled;
        cur.emphasized = emphasized;
    }
}

impl Default for OrderTicketRenderer {
    fn default() -> Self {
        Self::new(48)
    }
}
