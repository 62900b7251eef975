//! Line pricing — pure functions over already-resolved catalog state
//!
//! The booking engine fetches catalog documents and consumes entitlements;
//! everything monetary happens here in Decimal so the totals invariant
//! holds to the cent.

use rust_decimal::Decimal;

use crate::money::{self, to_decimal, to_f64};
use crate::utils::{AppError, AppResult};
use shared::models::{Product, ProductLine, ServiceLine, Variant};

/// A service line covered by a consumed package entitlement
pub fn package_service_line(service: &str, staff: &str, package_id: &str) -> ServiceLine {
    ServiceLine {
        service: service.to_string(),
        staff: staff.to_string(),
        amount: 0.0,
        used_package: true,
        package: Some(package_id.to_string()),
        paid: false,
        commission_earned: None,
    }
}

/// A walk-in service line priced at the catalog's regular price
pub fn paid_service_line(service: &str, staff: &str, regular_price: f64) -> AppResult<ServiceLine> {
    money::validate_price(regular_price, "regular_price")?;
    Ok(ServiceLine {
        service: service.to_string(),
        staff: staff.to_string(),
        amount: regular_price,
        used_package: false,
        package: None,
        paid: false,
        commission_earned: None,
    })
}

/// Price one product line against the catalog.
///
/// Variant pricing requires the variant to expose a numeric price; a bare
/// product falls back to its own price, defaulting to 0.
pub fn price_product_line(
    product: &Product,
    variant: Option<&Variant>,
    quantity: i64,
) -> AppResult<ProductLine> {
    money::validate_quantity(quantity)?;

    let unit_price = match variant {
        Some(v) => v
            .price
            .ok_or_else(|| AppError::invalid("Variant or price unavailable"))?,
        None => product.price.unwrap_or(0.0),
    };
    money::validate_price(unit_price, "unit_price")?;

    let total = money::line_total(unit_price, quantity);
    Ok(ProductLine {
        product: product.id.clone().unwrap_or_default(),
        variant: variant.and_then(|v| v.id.clone()),
        quantity,
        unit_price,
        total_price: to_f64(total),
    })
}

/// Grand totals over resolved lines: (service_total, product_total,
/// total_payment). Fails on non-finite arithmetic.
pub fn sum_totals(
    services: &[ServiceLine],
    products: &[ProductLine],
) -> AppResult<(f64, f64, f64)> {
    let service_total: Decimal = services.iter().map(|s| to_decimal(s.amount)).sum();
    let product_total: Decimal = products.iter().map(|p| to_decimal(p.total_price)).sum();
    let total = service_total + product_total;

    let total_f64 = to_f64(total);
    money::require_finite(total_f64, "total_payment")?;

    Ok((to_f64(service_total), to_f64(product_total), total_f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: Option<f64>) -> Product {
        Product {
            id: Some("product:p1".to_string()),
            salon: "salon:s1".to_string(),
            branches: vec![],
            product_name: "Shampoo".to_string(),
            description: None,
            price,
            stock: Some(10),
            sku: None,
            is_active: true,
            created_at: 0,
        }
    }

    fn variant(price: Option<f64>) -> Variant {
        Variant {
            id: Some("variant:v1".to_string()),
            salon: "salon:s1".to_string(),
            product: "product:p1".to_string(),
            name: "250ml".to_string(),
            price,
            stock: Some(5),
            is_active: true,
        }
    }

    #[test]
    fn test_product_line_uses_variant_price() {
        let line = price_product_line(&product(Some(100.0)), Some(&variant(Some(120.0))), 2).unwrap();
        assert_eq!(line.unit_price, 120.0);
        assert_eq!(line.total_price, 240.0);
        assert_eq!(line.variant.as_deref(), Some("variant:v1"));
    }

    #[test]
    fn test_product_line_falls_back_to_product_price() {
        let line = price_product_line(&product(Some(100.0)), None, 3).unwrap();
        assert_eq!(line.unit_price, 100.0);
        assert_eq!(line.total_price, 300.0);
        assert!(line.variant.is_none());
    }

    #[test]
    fn test_product_without_price_defaults_to_zero() {
        let line = price_product_line(&product(None), None, 2).unwrap();
        assert_eq!(line.unit_price, 0.0);
        assert_eq!(line.total_price, 0.0);
    }

    #[test]
    fn test_variant_without_price_is_rejected() {
        let err = price_product_line(&product(Some(100.0)), Some(&variant(None)), 1);
        assert!(matches!(err, Err(AppError::Invalid(_))));
    }

    #[test]
    fn test_non_positive_quantity_is_rejected() {
        assert!(price_product_line(&product(Some(10.0)), None, 0).is_err());
        assert!(price_product_line(&product(Some(10.0)), None, -2).is_err());
    }

    #[test]
    fn test_totals_are_exact_to_the_cent() {
        let services = vec![
            paid_service_line("service:a", "staff:a", 199.99).unwrap(),
            package_service_line("service:b", "staff:b", "customer_package:p"),
        ];
        let products = vec![
            price_product_line(&product(Some(0.1)), None, 3).unwrap(),
        ];

        let (service_total, product_total, total) = sum_totals(&services, &products).unwrap();
        assert_eq!(service_total, 199.99);
        assert_eq!(product_total, 0.3);
        assert_eq!(total, 200.29);
    }

    #[test]
    fn test_package_line_amount_is_zero() {
        let line = package_service_line("service:a", "staff:a", "customer_package:p");
        assert_eq!(line.amount, 0.0);
        assert!(line.used_package);
        assert_eq!(line.package.as_deref(), Some("customer_package:p"));
    }
}
