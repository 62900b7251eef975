//! Invoice document types

/// One itemized line on an invoice
#[derive(Debug, Clone)]
pub struct InvoiceLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Everything a renderer needs to lay out an invoice.
///
/// Built by the order/settlement engines from already-persisted state; the
/// renderer itself performs no lookups.
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    /// "Invoice" for orders, "Payment Invoice" for settlements
    pub title: String,
    /// Order code or payment id shown in the metadata block
    pub reference: String,
    pub salon_name: String,
    pub branch_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub payment_method: String,
    /// Unix millis
    pub issued_at: i64,
    pub lines: Vec<InvoiceLine>,
    /// Label → amount rows of the summary block, in display order
    pub summary: Vec<(String, f64)>,
    pub total_label: String,
    pub total: f64,
}

/// Currency text exactly as historical invoices printed it: symbol-prefixed,
/// two decimals. Downstream invoice parsers depend on this format.
pub fn format_currency(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_two_decimals() {
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(950.0), "₹950.00");
        assert_eq!(format_currency(105.5), "₹105.50");
        assert_eq!(format_currency(1234.567), "₹1234.57");
    }
}
