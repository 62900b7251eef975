//! Invoice renderer
//!
//! [`InvoiceRenderer`] is the narrow seam between the financial pipeline
//! and the PDF engine; [`PdfRenderer`] is the production implementation on
//! printpdf with built-in Helvetica fonts.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use super::types::{format_currency, InvoiceDocument};
use crate::utils::{AppError, AppResult};

/// Renders an [`InvoiceDocument`] into a byte artifact
pub trait InvoiceRenderer: Send + Sync {
    fn render(&self, doc: &InvoiceDocument) -> AppResult<Vec<u8>>;
}

/// A4 page, single column layout
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
/// Column positions of the line table (mm from left edge)
const COL_NAME: f32 = MARGIN_MM;
const COL_QTY: f32 = 110.0;
const COL_UNIT: f32 = 135.0;
const COL_TOTAL: f32 = 168.0;

/// PDF invoice renderer
pub struct PdfRenderer {
    line_height: f32,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self { line_height: 6.0 }
    }
}

/// Cursor over one growing PDF document
struct PdfWriter {
    doc: printpdf::PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
    y: f32,
    line_height: f32,
}

impl PdfWriter {
    fn new(title: &str, line_height: f32) -> AppResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "invoice");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::internal(format!("Font load failed: {e}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::internal(format!("Font load failed: {e}")))?;
        let oblique = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| AppError::internal(format!("Font load failed: {e}")))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            oblique,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
            line_height,
        })
    }

    /// Advance the cursor, breaking to a fresh page when the bottom margin
    /// is reached
    fn advance(&mut self, amount: f32) {
        self.y -= amount;
        if self.y < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "invoice");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }

    fn text(&mut self, content: &str, size: f32, x: f32, font: Font) {
        let font_ref = match font {
            Font::Regular => &self.regular,
            Font::Bold => &self.bold,
            Font::Oblique => &self.oblique,
        };
        self.layer
            .use_text(content, size, Mm(x), Mm(self.y), font_ref);
    }

    fn line(&mut self, content: &str, size: f32, x: f32, font: Font) {
        self.text(content, size, x, font);
        self.advance(self.line_height);
    }

    fn separator(&mut self) {
        self.line(&"-".repeat(96), 9.0, MARGIN_MM, Font::Regular);
    }

    fn finish(self) -> AppResult<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| AppError::internal(format!("PDF serialization failed: {e}")))
    }
}

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
    Oblique,
}

impl InvoiceRenderer for PdfRenderer {
    fn render(&self, doc: &InvoiceDocument) -> AppResult<Vec<u8>> {
        let mut w = PdfWriter::new(&doc.title, self.line_height)?;

        // Header: salon / branch / contact block
        w.line(&doc.salon_name, 20.0, MARGIN_MM, Font::Bold);
        w.line(&doc.branch_name, 13.0, MARGIN_MM, Font::Bold);
        w.line(&doc.address, 9.0, MARGIN_MM, Font::Regular);
        w.line(&format!("Phone: {}", doc.phone), 9.0, MARGIN_MM, Font::Regular);
        w.line(&format!("Email: {}", doc.email), 9.0, MARGIN_MM, Font::Regular);
        w.advance(self.line_height);

        // Title
        w.line(&doc.title, 15.0, MARGIN_MM, Font::Bold);
        w.advance(self.line_height / 2.0);

        // Metadata block
        let issued = chrono::DateTime::from_timestamp_millis(doc.issued_at)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string());
        w.line(&format!("Reference: {}", doc.reference), 10.0, MARGIN_MM, Font::Regular);
        w.line(&format!("Customer: {}", doc.customer_name), 10.0, MARGIN_MM, Font::Regular);
        w.line(&format!("Phone: {}", doc.customer_phone), 10.0, MARGIN_MM, Font::Regular);
        w.line(&format!("Date: {}", issued), 10.0, MARGIN_MM, Font::Regular);
        w.line(
            &format!("Payment Method: {}", doc.payment_method),
            10.0,
            MARGIN_MM,
            Font::Regular,
        );
        w.advance(self.line_height);

        // Line table
        if !doc.lines.is_empty() {
            w.text("Item", 10.0, COL_NAME, Font::Bold);
            w.text("Qty", 10.0, COL_QTY, Font::Bold);
            w.text("Unit Price", 10.0, COL_UNIT, Font::Bold);
            w.text("Total", 10.0, COL_TOTAL, Font::Bold);
            w.advance(self.line_height);
            w.separator();

            for line in &doc.lines {
                w.text(&line.name, 10.0, COL_NAME, Font::Regular);
                w.text(&line.quantity.to_string(), 10.0, COL_QTY, Font::Regular);
                w.text(&format_currency(line.unit_price), 10.0, COL_UNIT, Font::Regular);
                w.text(&format_currency(line.total_price), 10.0, COL_TOTAL, Font::Regular);
                w.advance(self.line_height);
            }
            w.separator();
        }

        // Summary block
        w.line("Summary", 12.0, MARGIN_MM, Font::Bold);
        for (label, amount) in &doc.summary {
            w.text(label, 10.0, COL_UNIT - 35.0, Font::Regular);
            w.text(&format_currency(*amount), 10.0, COL_TOTAL, Font::Regular);
            w.advance(self.line_height);
        }
        w.advance(self.line_height / 2.0);
        w.text(&doc.total_label, 11.0, COL_UNIT - 35.0, Font::Bold);
        w.text(&format_currency(doc.total), 11.0, COL_TOTAL, Font::Bold);
        w.advance(self.line_height * 2.0);

        // Footer
        w.line("Thank you for choosing us!", 9.0, MARGIN_MM, Font::Oblique);
        w.line(
            "This is a system-generated invoice.",
            9.0,
            MARGIN_MM,
            Font::Oblique,
        );

        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoicing::types::InvoiceLine;

    fn sample_doc() -> InvoiceDocument {
        InvoiceDocument {
            title: "Invoice".to_string(),
            reference: "ORD-20250301-1234".to_string(),
            salon_name: "Aura Salon".to_string(),
            branch_name: "Downtown".to_string(),
            address: "12 Rose Street".to_string(),
            phone: "+91 99999 88888".to_string(),
            email: "downtown@aura.example".to_string(),
            customer_name: "Priya Sharma".to_string(),
            customer_phone: "+91 77777 66666".to_string(),
            payment_method: "cash".to_string(),
            issued_at: 1_740_000_000_000,
            lines: vec![InvoiceLine {
                name: "Argan Oil Shampoo".to_string(),
                quantity: 2,
                unit_price: 450.0,
                total_price: 900.0,
            }],
            summary: vec![("Subtotal".to_string(), 900.0)],
            total_label: "Total Payable".to_string(),
            total: 900.0,
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let renderer = PdfRenderer::default();
        let bytes = renderer.render(&sample_doc()).unwrap();
        // %PDF magic header
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_render_many_lines_spans_pages() {
        let mut doc = sample_doc();
        doc.lines = (0..120)
            .map(|i| InvoiceLine {
                name: format!("Item {}", i),
                quantity: 1,
                unit_price: 10.0,
                total_price: 10.0,
            })
            .collect();
        let renderer = PdfRenderer::default();
        let bytes = renderer.render(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
