use proptest::prelude::*;
use rust_decimal::Decimal;
use storefront_api::{
    error::AppError,
    models::OrderItem,
    services::pricing::{price_lines, round_money},
};
use uuid::Uuid;

fn item(cents: i64, quantity: i32) -> OrderItem {
    OrderItem {
        product_id: Uuid::new_v4(),
        title: "Item".into(),
        price: Decimal::new(cents, 2),
        quantity,
        image: None,
    }
}

#[test]
fn classic_tee_example() {
    let priced = price_lines(vec![item(1999, 3)], Decimal::new(500, 2)).expect("priced");
    assert_eq!(priced.subtotal, Decimal::new(5997, 2));
    assert_eq!(priced.shipping, Decimal::new(5, 0));
    assert_eq!(priced.total, Decimal::new(6497, 2));
}

#[test]
fn subtotal_is_rounded_once_from_the_exact_sum() {
    // three lines of 0.005 would round to 0.00 each, but sum to 0.015
    let lines = (0..3)
        .map(|_| OrderItem {
            price: Decimal::new(5, 3),
            ..item(0, 1)
        })
        .collect();
    let priced = price_lines(lines, Decimal::ZERO).expect("priced");
    assert_eq!(priced.subtotal, Decimal::new(2, 2));
}

#[test]
fn rounding_is_half_to_even() {
    assert_eq!(round_money(Decimal::new(1005, 3)), Decimal::new(100, 2));
    assert_eq!(round_money(Decimal::new(1015, 3)), Decimal::new(102, 2));
    assert_eq!(round_money(Decimal::new(12344, 4)), Decimal::new(123, 2));
}

#[test]
fn oversized_line_is_rejected_instead_of_overflowing() {
    let lines = vec![
        item(1999, 1),
        OrderItem {
            price: Decimal::MAX,
            ..item(0, 2_000_000_000)
        },
    ];

    let err = price_lines(lines, Decimal::ZERO).unwrap_err();

    let AppError::Validation(errors) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.violations()[0].field, "items[1].quantity");
    assert_eq!(errors.violations()[0].message, "order total out of range");
}

#[test]
fn lines_that_fit_alone_but_not_together_are_rejected() {
    let half = Decimal::MAX / Decimal::from(2);
    let lines = vec![
        OrderItem { price: half, ..item(0, 1) },
        OrderItem { price: half, ..item(0, 1) },
        OrderItem { price: half, ..item(0, 1) },
    ];

    let err = price_lines(lines, Decimal::ZERO).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn shipping_that_overflows_the_total_is_rejected() {
    let err = price_lines(
        vec![OrderItem { price: Decimal::MAX, ..item(0, 1) }],
        Decimal::MAX,
    )
    .unwrap_err();

    let AppError::Validation(errors) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.violations()[0].field, "shipping");
}

proptest! {
    #[test]
    fn totals_follow_the_rounding_rules(
        lines in prop::collection::vec((0i64..1_000_000, 1i32..500, 0u32..4), 1..8),
        shipping_cents in 0i64..100_000,
    ) {
        let items: Vec<OrderItem> = lines
            .iter()
            .map(|(mantissa, quantity, scale)| OrderItem {
                price: Decimal::new(*mantissa, *scale),
                ..item(0, *quantity)
            })
            .collect();
        let exact: Decimal = items
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum();
        let shipping = Decimal::new(shipping_cents, 2);

        let priced = price_lines(items.clone(), shipping).expect("amounts in range");

        prop_assert_eq!(priced.subtotal, exact.round_dp(2));
        prop_assert_eq!(priced.total, (priced.subtotal + priced.shipping).round_dp(2));
        prop_assert!(priced.total >= priced.subtotal);
        prop_assert_eq!(priced.items, items);
    }
}
