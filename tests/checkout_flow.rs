use canteen_cart::core::events::CartEvent;
use canteen_cart::core::types::{OrderStatus, PaymentStatus};
use canteen_cart::remote::{MemoryRemote, RemoteService};
use canteen_cart::storage::MemoryStore;
use canteen_cart::{
    AuthManager, CartConfig, CartManager, CustomerDetails, MenuItem, MenuManager, MergePolicy,
    OrderManager, Session,
};

use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

fn menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new(1, "Paneer Butter Masala", Decimal::from(80)).with_category("Main Course"),
        MenuItem::new(3, "Veg Biryani", Decimal::from(90)).with_category("Main Course"),
        MenuItem::new(9, "Masala Chai", Decimal::from(15)).with_category("Beverages"),
    ]
}

struct Storefront {
    remote: Arc<MemoryRemote>,
    cart: CartManager,
    auth: AuthManager,
    orders: OrderManager,
    menu: MenuManager,
}

fn storefront(remote: MemoryRemote, config: CartConfig) -> Storefront {
    let _ = env_logger::try_init();

    let remote = Arc::new(remote.with_menu(menu()));
    let session = Session::guest();
    Storefront {
        cart: CartManager::new(
            session.clone(),
            remote.clone(),
            Arc::new(MemoryStore::new()),
            config,
        ),
        auth: AuthManager::new(remote.clone(), session.clone()),
        orders: OrderManager::new(remote.clone(), session),
        menu: MenuManager::new(remote.clone()),
        remote,
    }
}

#[tokio::test]
async fn test_guest_to_member_checkout() {
    let mut shop = storefront(MemoryRemote::new(), CartConfig::default());
    let mut events = shop.cart.subscribe();

    assert!(shop.auth.check_auth_state().await.is_none());
    shop.cart.load_cart().await;
    let items = shop.menu.load_menu_items().await.to_vec();
    assert_eq!(items.len(), 3);

    // browsing as a guest
    shop.cart.add_item(&items[0]);
    assert_eq!(shop.cart.total_items(), 1);

    let signed_up = shop
        .auth
        .sign_up("asha@college.edu", "hunter22", "Asha Rao")
        .await;
    assert!(signed_up.success);

    let signed_in = shop
        .auth
        .sign_in(&mut shop.cart, "asha@college.edu", "hunter22")
        .await;
    assert!(signed_in.success);
    assert!(shop.cart.cart().is_empty());

    let paneer = shop.menu.find(1).cloned().unwrap();
    let chai = shop.menu.find(9).cloned().unwrap();
    shop.cart.add_item(&paneer);
    shop.cart.add_item(&paneer);
    shop.cart.add_item(&chai);
    shop.cart.flush().await;
    assert_eq!(shop.cart.total_price(), Decimal::from(175));
    assert_eq!(shop.cart.grand_total(), Decimal::new(18375, 2));

    let result = shop
        .orders
        .create_order(&mut shop.cart, "upi", CustomerDetails::new().with_phone("98450 00000"))
        .await;
    assert!(result.success, "{:?}", result.message);
    assert!(shop.cart.cart().is_empty());
    shop.cart.flush().await;

    let details = shop
        .orders
        .get_order_details(result.order_id.unwrap())
        .await
        .unwrap();
    assert_eq!(details.order.order_number, result.order_number);
    assert_eq!(details.order.status, OrderStatus::Confirmed);
    assert_eq!(details.order.payment_status, Some(PaymentStatus::Completed));
    assert_eq!(details.order.total_amount, Some(Decimal::from(175)));
    assert_eq!(details.order.tax_amount, Some(Decimal::new(875, 2)));
    assert_eq!(details.order.customer.name.as_deref(), Some("Asha Rao"));
    assert_eq!(details.order.customer.phone.as_deref(), Some("98450 00000"));
    assert_eq!(details.lines.len(), 2);

    // the emptied cart was mirrored to the pending order
    let identity = shop.auth.session().current().unwrap();
    let pending = shop
        .remote
        .find_order(identity.id, OrderStatus::Pending)
        .await
        .unwrap()
        .unwrap();
    assert!(pending.lines.is_empty());

    let mut synced = 0;
    while let Ok(event) = events.try_recv() {
        match event {
            CartEvent::Synced { .. } => synced += 1,
            CartEvent::SyncFailed { message } => panic!("unexpected sync failure: {}", message),
            _ => {}
        }
    }
    assert_eq!(synced, 4);

    let signed_out = shop.auth.sign_out(&mut shop.cart).await;
    assert!(signed_out.success);
    // back to the guest copy written before sign in
    assert_eq!(shop.cart.total_items(), 1);
}

#[tokio::test]
async fn test_merged_guest_cart_survives_into_order() {
    let config = CartConfig {
        merge_policy: MergePolicy::SumQuantities,
        ..CartConfig::default()
    };
    let mut shop = storefront(
        MemoryRemote::new().with_latency(Duration::from_millis(5)),
        config,
    );
    let items = shop.menu.load_menu_items().await.to_vec();

    shop.auth
        .sign_up("ravi@college.edu", "biryani!", "Ravi Kumar")
        .await;
    shop.auth
        .sign_in(&mut shop.cart, "ravi@college.edu", "biryani!")
        .await;
    let biryani = items.iter().find(|item| item.id == 3).unwrap().clone();
    shop.cart.add_item(&biryani);
    shop.auth.sign_out(&mut shop.cart).await;

    shop.cart.add_item(&biryani);
    shop.cart.update_quantity(3, 2);

    shop.auth
        .sign_in(&mut shop.cart, "ravi@college.edu", "biryani!")
        .await;
    assert_eq!(shop.cart.total_items(), 3);

    let result = shop
        .orders
        .create_order(&mut shop.cart, "cash", CustomerDetails::new())
        .await;
    assert!(result.success);
    shop.cart.flush().await;

    let lines = shop.remote.order_lines(result.order_id.unwrap()).await;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 3);
    assert_eq!(lines[0].total_price, Decimal::from(270));
}

#[tokio::test]
async fn test_guest_checkout_during_outage() {
    let mut shop = storefront(MemoryRemote::new(), CartConfig::default());
    let fallback = vec![MenuItem::new(100, "Samosa", Decimal::from(20))];
    shop.menu = MenuManager::new(shop.remote.clone()).with_fallback(fallback);

    shop.remote.fail_all("service unavailable");
    let items = shop.menu.load_menu_items().await.to_vec();
    assert_eq!(items[0].name, "Samosa");

    shop.cart.add_item(&items[0]);
    let result = shop
        .orders
        .create_order(&mut shop.cart, "cash", CustomerDetails::new().with_name("Guest"))
        .await;
    assert!(!result.success);
    assert_eq!(result.message.as_deref(), Some("service unavailable"));
    assert_eq!(shop.cart.total_items(), 1);

    shop.remote.clear_failures();
    let result = shop
        .orders
        .create_order(&mut shop.cart, "cash", CustomerDetails::new().with_name("Guest"))
        .await;
    assert!(result.success);
    assert!(shop.cart.cart().is_empty());

    let details = shop
        .orders
        .get_order_details(result.order_id.unwrap())
        .await
        .unwrap();
    assert_eq!(details.order.user_id, None);
    assert_eq!(details.order.customer.name.as_deref(), Some("Guest"));
    // the fallback item is unknown to the backend menu
    assert!(details.lines[0].menu_item.is_none());
}
