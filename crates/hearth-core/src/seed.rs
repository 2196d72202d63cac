//! # Seed Data
//!
//! The mock catalog, accounts and order history the storefront starts
//! with. There is no backend; these lists stand in for one.
//!
//! | Data     | Count | Notes                                          |
//! |----------|-------|------------------------------------------------|
//! | Products | 12    | ids "1".."12", six of them marked down         |
//! | Users    | 3     | one visitor, one admin, one moderator          |
//! | Orders   | 5     | all belong to user "1", one per status + extra |

use chrono::{DateTime, TimeZone, Utc};

use crate::money::Money;
use crate::types::{Order, OrderItem, OrderStatus, Product, Role, TrackingInfo, User};

const UNSPLASH: &str = "https://images.unsplash.com/photo-";
const UNSPLASH_QUERY: &str =
    "?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop";

// =============================================================================
// Products
// =============================================================================

struct ProductSeed {
    id: &'static str,
    name: &'static str,
    price: i64,
    old_price: Option<i64>,
    product_type: &'static str,
    rating: f64,
    photo: &'static str,
    width: u32,
    purchase_count: u32,
    description: &'static str,
}

const PRODUCTS: [ProductSeed; 12] = [
    ProductSeed {
        id: "1",
        name: "Modern Leather Sofa",
        price: 89990,
        old_price: None,
        product_type: "Sofas",
        rating: 4.8,
        photo: "1555041469-a586c61ea9bc",
        width: 1770,
        purchase_count: 124,
        description: "Современный кожаный диван, сочетающий комфорт и стиль с использованием премиальных материалов. Идеально подходит для современных гостиных и офисов.",
    },
    ProductSeed {
        id: "2",
        name: "Scandinavian Dining Table",
        price: 59990,
        old_price: Some(69990),
        product_type: "Tables",
        rating: 4.6,
        photo: "1577140917170-285929fb55b7",
        width: 1770,
        purchase_count: 87,
        description: "Минималистичный обеденный стол в скандинавском стиле из массива дуба. Вмещает до 6 человек с комфортом.",
    },
    ProductSeed {
        id: "3",
        name: "Ergonomic Office Chair",
        price: 24990,
        old_price: Some(29990),
        product_type: "Chairs",
        rating: 4.7,
        photo: "1580480055273-228ff5388ef8",
        width: 1000,
        purchase_count: 215,
        description: "Эргономичное офисное кресло с регулируемой высотой, поддержкой поясницы и дышащей сетчатой спинкой. Разработано для длительного комфортного сидения.",
    },
    ProductSeed {
        id: "4",
        name: "King Size Platform Bed",
        price: 62990,
        old_price: None,
        product_type: "Beds",
        rating: 4.5,
        photo: "1505693416388-ac5ce068fe85",
        width: 1770,
        purchase_count: 63,
        description: "Современная двуспальная кровать-платформа с деревянным каркасом и мягким изголовьем. Не требует пружинного блока.",
    },
    ProductSeed {
        id: "5",
        name: "Minimalist Bookshelf",
        price: 19990,
        old_price: Some(24990),
        product_type: "Bookshelves",
        rating: 4.3,
        photo: "1594620302200-9a762244a156",
        width: 1769,
        purchase_count: 92,
        description: "Минималистичный 5-ярусный книжный шкаф с металлическим каркасом и деревянными полками. Идеально подходит для демонстрации книг и декоративных предметов.",
    },
    ProductSeed {
        id: "6",
        name: "Velvet Accent Chair",
        price: 31990,
        old_price: None,
        product_type: "Chairs",
        rating: 4.4,
        photo: "1598300042247-d088f8ab3a91",
        width: 1770,
        purchase_count: 78,
        description: "Роскошное бархатное акцентное кресло с ножками с золотистой отделкой. Добавляет нотку элегантности любому жилому пространству.",
    },
    ProductSeed {
        id: "7",
        name: "Glass Coffee Table",
        price: 17990,
        old_price: Some(21990),
        product_type: "Tables",
        rating: 4.2,
        photo: "1567538096630-e0c55bd6374c",
        width: 1000,
        purchase_count: 105,
        description: "Современный журнальный столик с закаленной стеклянной столешницей и металлическим каркасом. Имеет нижнюю полку для дополнительного хранения.",
    },
    ProductSeed {
        id: "8",
        name: "Wooden Wardrobe",
        price: 54990,
        old_price: None,
        product_type: "Wardrobes",
        rating: 4.6,
        photo: "1595428774223-ef52624120d2",
        width: 1770,
        purchase_count: 42,
        description: "Просторный деревянный шкаф с пространством для вешалок, полками и ящиками. Изготовлен из экологичного дуба с натуральной отделкой.",
    },
    ProductSeed {
        id: "9",
        name: "Pendant Ceiling Light",
        price: 8990,
        old_price: Some(11990),
        product_type: "Lighting",
        rating: 4.5,
        photo: "1513506003901-1e6a229e2d15",
        width: 1770,
        purchase_count: 137,
        description: "Современный подвесной потолочный светильник с регулируемой высотой. Идеально подходит для обеденных зон и кухонных островов.",
    },
    ProductSeed {
        id: "10",
        name: "Standing Desk",
        price: 37990,
        old_price: None,
        product_type: "Desks",
        rating: 4.7,
        photo: "1611269154421-4e27233ac5c7",
        width: 1000,
        purchase_count: 89,
        description: "Электрический стоячий стол с регулировкой высоты. Плавный и тихий мотор с настройками памяти для разных высот.",
    },
    ProductSeed {
        id: "11",
        name: "Storage Cabinet",
        price: 27990,
        old_price: Some(32990),
        product_type: "Cabinets",
        rating: 4.3,
        photo: "1601760561441-16420502c7e0",
        width: 1770,
        purchase_count: 67,
        description: "Универсальный шкаф для хранения с регулируемыми полками и дверцами. Идеально подходит для гостиных, офисов или спален.",
    },
    ProductSeed {
        id: "12",
        name: "Wall Mirror",
        price: 12990,
        old_price: None,
        product_type: "Decor",
        rating: 4.4,
        photo: "1618220252344-8ec99ec624b1",
        width: 1000,
        purchase_count: 112,
        description: "Круглое настенное зеркало с тонкой металлической рамой. Добавляет света и пространства в любую комнату.",
    },
];

/// The starting catalog.
pub fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|s| Product {
            id: s.id.to_string(),
            name: s.name.to_string(),
            price: Money::from_units(s.price),
            old_price: s.old_price.map(Money::from_units),
            product_type: s.product_type.to_string(),
            rating: s.rating,
            image_url: format!("{UNSPLASH}{}{UNSPLASH_QUERY}&w={}&q=80", s.photo, s.width),
            purchase_count: s.purchase_count,
            description: s.description.to_string(),
            in_stock: true,
        })
        .collect()
}

// =============================================================================
// Users
// =============================================================================

/// The mock accounts. All of them accept [`crate::MOCK_PASSWORD`].
pub fn users() -> Vec<User> {
    let user = |id: &str, email: &str, name: &str, notifications: bool, role: Role| User {
        id: id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        notifications_enabled: Some(notifications),
        role,
    };

    vec![
        user("1", "user@example.com", "John Doe", true, Role::Visitor),
        user("2", "admin@example.com", "Admin User", true, Role::Admin),
        user("3", "moderator@example.com", "Moderator User", false, Role::Moderator),
    ]
}

// =============================================================================
// Orders
// =============================================================================

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn item(product_id: &str, quantity: u32, name: &str, price: i64) -> OrderItem {
    OrderItem {
        product_id: product_id.to_string(),
        quantity,
        name: name.to_string(),
        price: Money::from_units(price),
    }
}

fn order(
    id: &str,
    date: DateTime<Utc>,
    items: Vec<OrderItem>,
    total: i64,
    status: OrderStatus,
    address: &str,
) -> Order {
    Order {
        id: id.to_string(),
        user_id: "1".to_string(),
        date,
        items,
        total: Money::from_units(total),
        status,
        address: Some(address.to_string()),
        tracking_info: None,
    }
}

/// The order history the order store starts with.
pub fn orders() -> Vec<Order> {
    let mut shipped = order(
        "order3",
        day(2023, 8, 10),
        vec![
            item("2", 1, "Wooden Bed Frame", 79999),
            item("8", 1, "Bedside Table", 14999),
        ],
        94998,
        OrderStatus::Shipped,
        "ул. Гагарина 78, кв. 34, Москва, 123458",
    );
    shipped.tracking_info = Some(TrackingInfo {
        tracking_number: "TRK789456".to_string(),
        estimated_delivery: day(2023, 8, 15),
        current_location: "Sorting Center".to_string(),
        progress: 60,
    });

    vec![
        order(
            "order1",
            day(2023, 6, 15),
            vec![
                item("3", 1, "Modern Sofa", 59999),
                item("7", 2, "Coffee Table", 12350),
            ],
            84700,
            OrderStatus::Delivered,
            "ул. Ленина 123, кв. 45, Москва, 123456",
        ),
        order(
            "order2",
            day(2023, 7, 22),
            vec![
                item("5", 1, "Dining Chair", 29900),
                item("9", 2, "Floor Lamp", 8990),
            ],
            47880,
            OrderStatus::Processing,
            "ул. Пушкина 45, кв. 12, Москва, 123457",
        ),
        shipped,
        order(
            "order4",
            day(2023, 9, 5),
            vec![
                item("1", 2, "Leather Armchair", 49999),
                item("4", 1, "Bookshelf", 34999),
            ],
            134997,
            OrderStatus::Cancelled,
            "ул. Чехова 90, кв. 56, Москва, 123459",
        ),
        order(
            "order5",
            day(2023, 10, 18),
            vec![
                item("6", 4, "Throw Pillow", 2999),
                item("10", 1, "Area Rug", 19999),
            ],
            31995,
            OrderStatus::Processing,
            "ул. Толстого 112, кв. 78, Москва, 123460",
        ),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PRODUCT_TYPES;
    use std::collections::HashSet;

    #[test]
    fn test_product_ids_unique_and_types_known() {
        let products = products();
        let ids: HashSet<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 12);
        assert!(products
            .iter()
            .all(|p| PRODUCT_TYPES.contains(&p.product_type.as_str())));
    }

    #[test]
    fn test_six_promotions() {
        assert_eq!(products().iter().filter(|p| p.is_promotion()).count(), 6);
    }

    #[test]
    fn test_image_urls() {
        let products = products();
        assert!(products[0]
            .image_url
            .starts_with("https://images.unsplash.com/photo-1555041469-a586c61ea9bc?"));
        assert!(products[0].image_url.ends_with("&w=1770&q=80"));
    }

    #[test]
    fn test_orders_one_per_status_and_tracking() {
        let orders = orders();
        for status in OrderStatus::ALL {
            assert!(orders.iter().any(|o| o.status == status));
        }
        let tracked: Vec<_> = orders.iter().filter(|o| o.tracking_info.is_some()).collect();
        assert_eq!(tracked.len(), 1);
        assert_eq!(tracked[0].id, "order3");
    }

    #[test]
    fn test_order_dates() {
        let orders = orders();
        assert_eq!(orders[0].date.to_rfc3339(), "2023-06-15T00:00:00+00:00");
    }
}
