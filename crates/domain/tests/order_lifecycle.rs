//! Integration tests for the Order aggregate.
//!
//! These walk the full travel-purchase journey: assembling a cart of
//! flights and ancillaries, item-level cancellation, payment, and the
//! cancellation cascade.

use chrono::{TimeZone, Utc};
use domain::{
    AncillaryType, Currency, ItemStatus, Money, Order, OrderError, OrderItem, OrderStatus,
};
use rust_decimal_macros::dec;

fn usd(amount: rust_decimal::Decimal) -> Money {
    Money::of(amount, Currency::usd()).unwrap()
}

fn new_order() -> Order {
    Order::builder()
        .customer_id("CUST-98234")
        .customer_email("jane.doe@email.com")
        .build()
        .unwrap()
}

fn outbound_flight() -> OrderItem {
    OrderItem::flight()
        .price(usd(dec!(549.99)))
        .origin("LHR")
        .destination("JFK")
        .flight_number("BA178")
        .departure_time(Utc.with_ymd_and_hms(2026, 7, 15, 11, 0, 0).unwrap())
        .arrival_time(Utc.with_ymd_and_hms(2026, 7, 15, 14, 30, 0).unwrap())
        .build()
        .unwrap()
}

fn return_flight() -> OrderItem {
    OrderItem::flight()
        .price(usd(dec!(479.00)))
        .origin("JFK")
        .destination("LHR")
        .flight_number("BA177")
        .departure_time(Utc.with_ymd_and_hms(2026, 7, 22, 16, 0, 0).unwrap())
        .arrival_time(Utc.with_ymd_and_hms(2026, 7, 23, 5, 45, 0).unwrap())
        .build()
        .unwrap()
}

mod full_journey {
    use super::*;

    #[test]
    fn cart_assembly_item_cancel_payment_confirm() {
        let mut order = new_order();
        assert_eq!(order.status(), OrderStatus::Created);

        // Two legs of a round trip.
        let outbound = outbound_flight();
        let outbound_id = outbound.id();
        order.add_item(outbound).unwrap();
        order.add_item(return_flight()).unwrap();

        // Ancillaries: two tied to the outbound leg, one order-level.
        order
            .add_item(
                OrderItem::ancillary()
                    .price(usd(dec!(45.00)))
                    .name("Extra Baggage 23 kg")
                    .kind(AncillaryType::Baggage)
                    .linked_flight_item(outbound_id)
                    .build()
                    .unwrap(),
            )
            .unwrap();
        let meal = OrderItem::ancillary()
            .price(usd(dec!(28.50)))
            .name("Vegetarian Meal")
            .kind(AncillaryType::Meal)
            .linked_flight_item(outbound_id)
            .build()
            .unwrap();
        let meal_id = meal.id();
        order.add_item(meal).unwrap();
        order
            .add_item(
                OrderItem::ancillary()
                    .price(usd(dec!(15.00)))
                    .name("Wi-Fi Pass (Full Trip)")
                    .kind(AncillaryType::Wifi)
                    .build()
                    .unwrap(),
            )
            .unwrap();

        assert_eq!(order.items().len(), 5);
        assert_eq!(order.flight_items().count(), 2);
        assert_eq!(order.ancillary_items().count(), 3);
        assert_eq!(order.calculate_total().unwrap(), usd(dec!(1117.49)));

        // Cancel the meal: item-level only, the order stays Created.
        order.cancel_item(meal_id).unwrap();
        assert_eq!(order.item(meal_id).unwrap().status(), ItemStatus::Cancelled);
        assert_eq!(order.status(), OrderStatus::Created);
        assert_eq!(order.active_items().count(), 4);
        assert_eq!(order.calculate_total().unwrap(), usd(dec!(1088.99)));

        // Progress the lifecycle to Confirmed.
        order.initiate_payment().unwrap();
        assert_eq!(order.status(), OrderStatus::PendingPayment);
        order.confirm().unwrap();
        assert_eq!(order.status(), OrderStatus::Confirmed);
    }

    #[test]
    fn linked_and_order_level_ancillaries() {
        let outbound = outbound_flight();
        let meal = OrderItem::ancillary()
            .price(usd(dec!(28.50)))
            .name("Vegetarian Meal")
            .kind(AncillaryType::Meal)
            .linked_flight_item(outbound.id())
            .build()
            .unwrap();
        let wifi = OrderItem::ancillary()
            .price(usd(dec!(15.00)))
            .name("Wi-Fi Pass (Full Trip)")
            .kind(AncillaryType::Wifi)
            .build()
            .unwrap();

        assert!(meal.ancillary_product().unwrap().is_linked_to_flight());
        assert!(!wifi.ancillary_product().unwrap().is_linked_to_flight());
    }
}

mod cancellation {
    use super::*;

    #[test]
    fn cascade_covers_confirmed_orders() {
        let mut order = new_order();
        let flight = outbound_flight();
        let flight_id = flight.id();
        order.add_item(flight).unwrap();
        order.initiate_payment().unwrap();
        order.confirm().unwrap();

        order.cancel().unwrap();

        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(
            order.item(flight_id).unwrap().status(),
            ItemStatus::Cancelled
        );
        assert_eq!(order.active_items().count(), 0);
    }

    #[test]
    fn cancelled_orders_reject_everything() {
        let mut order = new_order();
        order.add_item(outbound_flight()).unwrap();
        order.cancel().unwrap();

        assert!(matches!(
            order.add_item(return_flight()),
            Err(OrderError::OrderCancelled { .. })
        ));
        assert!(matches!(
            order.initiate_payment(),
            Err(OrderError::OrderCancelled { .. })
        ));
        assert!(matches!(
            order.cancel(),
            Err(OrderError::OrderCancelled { .. })
        ));
    }
}

mod error_paths {
    use super::*;

    #[test]
    fn double_item_cancel_is_an_illegal_transition() {
        let mut order = new_order();
        let meal = OrderItem::ancillary()
            .price(usd(dec!(28.50)))
            .name("Vegetarian Meal")
            .kind(AncillaryType::Meal)
            .build()
            .unwrap();
        let meal_id = meal.id();
        order.add_item(meal).unwrap();

        order.cancel_item(meal_id).unwrap();
        assert!(matches!(
            order.cancel_item(meal_id),
            Err(OrderError::IllegalItemTransition { .. })
        ));
    }

    #[test]
    fn payment_on_a_confirmed_order_fails() {
        let mut order = new_order();
        order.add_item(outbound_flight()).unwrap();
        order.initiate_payment().unwrap();
        order.confirm().unwrap();

        assert!(matches!(
            order.initiate_payment(),
            Err(OrderError::IllegalOrderTransition { .. })
        ));
    }

    #[test]
    fn errors_name_the_entities_involved() {
        let mut order = new_order();
        let order_id = order.id().clone();

        let err = order.initiate_payment().unwrap_err();
        assert!(err.to_string().contains(order_id.as_str()));
    }
}
