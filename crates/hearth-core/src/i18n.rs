//! # Translations
//!
//! Static translation tables and the lookup used by every store that
//! surfaces a user-facing message.
//!
//! ## Lookup Order
//! ```text
//! translate(Ru, "cart")
//!     │
//!     ├── Russian table has "cart"?  ──► "Корзина"
//!     │
//!     ├── English table has "cart"?  ──► "Cart"
//!     │
//!     └── neither                    ──► "cart"  (raw key)
//! ```
//!
//! Missing keys never fail; the worst case is the key itself on screen.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// A supported interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ru];

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    /// Name of the language in itself, for the language picker.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ru => "Русский",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "ru" | "russian" => Ok(Language::Ru),
            other => Err(crate::error::ValidationError::InvalidFormat {
                field: "language".to_string(),
                reason: format!("unsupported language '{}'", other),
            }),
        }
    }
}

/// Looks up `key` in `language`, falling back to English and then to the
/// key itself.
///
/// ## Example
/// ```rust
/// use hearth_core::i18n::{translate, Language};
///
/// assert_eq!(translate(Language::Ru, "cart"), "Корзина");
/// assert_eq!(translate(Language::En, "cart"), "Cart");
/// assert_eq!(translate(Language::Ru, "no.such.key"), "no.such.key");
/// ```
pub fn translate(language: Language, key: &str) -> &str {
    lookup(language, key)
        .or_else(|| english(key))
        .unwrap_or(key)
}

/// Looks up `key` in a single table without fallback.
pub fn lookup(language: Language, key: &str) -> Option<&'static str> {
    match language {
        Language::En => english(key),
        Language::Ru => russian(key),
    }
}

// =============================================================================
// Tables
// =============================================================================

fn english(key: &str) -> Option<&'static str> {
    let text = match key {
        // Navigation
        "home" => "Home",
        "catalog" => "Catalog",
        "cart" => "Cart",
        "account" => "Account",
        "checkout" => "Checkout",
        "adminPanel" => "Admin Panel",

        // Catalog
        "search" => "Search furniture...",
        "promotions" => "Promotions",
        "popular" => "Popular",
        "filter" => "Filter",
        "sort" => "Sort",
        "priceRange" => "Price range",
        "productType" => "Product type",
        "minRating" => "Minimum rating",
        "priceLowToHigh" => "Price: low to high",
        "priceHighToLow" => "Price: high to low",
        "popularity" => "Popularity",
        "rating" => "Rating",
        "inStock" => "In stock",
        "outOfStock" => "Out of stock",
        "addToCart" => "Add to cart",
        "addedToCart" => "Added to cart",
        "noProductsFound" => "No products found",

        // Cart and checkout
        "yourCartIsEmpty" => "Your cart is empty",
        "subtotal" => "Subtotal",
        "delivery" => "Delivery",
        "total" => "Total",
        "free" => "Free",
        "clearCart" => "Clear cart",
        "courierDelivery" => "Courier delivery",
        "pickupFromStore" => "Pickup from store",
        "cardPayment" => "Card payment",
        "cashOnDelivery" => "Cash on delivery",
        "address" => "Address",
        "city" => "City",
        "postalCode" => "Postal code",
        "phone" => "Phone",
        "placeOrder" => "Place order",
        "orderPlacedSuccess" => "Your order has been placed successfully",
        "paymentFailed" => "Payment failed. Please try again",
        "fillAllFields" => "Please fill in all required fields",
        "pleaseLogin" => "Please sign in to continue",

        // Orders
        "orders" => "Orders",
        "myOrders" => "My orders",
        "orderDetails" => "Order details",
        "trackOrder" => "Track order",
        "trackingNumber" => "Tracking number",
        "estimatedDelivery" => "Estimated delivery",
        "currentLocation" => "Current location",
        "sortingCenter" => "Sorting Center",
        "cancelOrder" => "Cancel order",
        "orderCancelled" => "Order cancelled",
        "noOrdersFound" => "No orders found",
        "processing" => "Processing",
        "shipped" => "Shipped",
        "delivered" => "Delivered",
        "cancelled" => "Cancelled",

        // Account
        "login" => "Sign in",
        "register" => "Sign up",
        "logout" => "Sign out",
        "loggedOut" => "You have been signed out",
        "email" => "Email",
        "password" => "Password",
        "confirmPassword" => "Confirm password",
        "name" => "Name",
        "profile" => "Profile",
        "editProfile" => "Edit profile",
        "profileUpdated" => "Profile updated",
        "notifications" => "Notifications",
        "invalidCredentials" => "Invalid email or password",
        "emailInUse" => "This email is already registered",
        "updateFailed" => "Could not update profile",
        "pleaseEnterEmail" => "Please enter your email",
        "pleaseEnterPassword" => "Please enter your password",
        "pleaseEnterName" => "Please enter your name",
        "invalidEmail" => "Please enter a valid email",
        "passwordsNotMatch" => "Passwords do not match",

        // Preferences
        "language" => "Language",
        "theme" => "Theme",
        "light" => "Light",
        "dark" => "Dark",

        // Admin
        "admin" => "Administrator",
        "moderator" => "Moderator",
        "visitor" => "Visitor",
        "accessDenied" => "Access denied",
        "noPermission" => "You do not have permission to perform this action",
        "products" => "Products",
        "users" => "Users",
        "totalRevenue" => "Total revenue",
        "productAdded" => "Product added",
        "productUpdated" => "Product updated",
        "productDeleted" => "Product deleted",
        "orderStatusUpdated" => "Order status updated",
        "userUpdated" => "User updated",
        "userDeleted" => "User deleted",
        _ => return None,
    };
    Some(text)
}

fn russian(key: &str) -> Option<&'static str> {
    let text = match key {
        // Navigation
        "home" => "Главная",
        "catalog" => "Каталог",
        "cart" => "Корзина",
        "account" => "Профиль",
        "checkout" => "Оформление заказа",
        "adminPanel" => "Панель администратора",

        // Catalog
        "search" => "Поиск мебели...",
        "promotions" => "Акции",
        "popular" => "Популярное",
        "filter" => "Фильтр",
        "sort" => "Сортировка",
        "priceRange" => "Диапазон цен",
        "productType" => "Тип товара",
        "minRating" => "Минимальный рейтинг",
        "priceLowToHigh" => "Цена: по возрастанию",
        "priceHighToLow" => "Цена: по убыванию",
        "popularity" => "Популярность",
        "rating" => "Рейтинг",
        "inStock" => "В наличии",
        "outOfStock" => "Нет в наличии",
        "addToCart" => "В корзину",
        "addedToCart" => "Добавлено в корзину",
        "noProductsFound" => "Товары не найдены",

        // Cart and checkout
        "yourCartIsEmpty" => "Ваша корзина пуста",
        "subtotal" => "Подытог",
        "delivery" => "Доставка",
        "total" => "Итого",
        "free" => "Бесплатно",
        "clearCart" => "Очистить корзину",
        "courierDelivery" => "Доставка курьером",
        "pickupFromStore" => "Самовывоз из магазина",
        "cardPayment" => "Оплата картой",
        "cashOnDelivery" => "Оплата при получении",
        "address" => "Адрес",
        "city" => "Город",
        "postalCode" => "Почтовый индекс",
        "phone" => "Телефон",
        "placeOrder" => "Оформить заказ",
        "orderPlacedSuccess" => "Ваш заказ успешно оформлен",
        "paymentFailed" => "Ошибка оплаты. Попробуйте ещё раз",
        "fillAllFields" => "Пожалуйста, заполните все обязательные поля",
        "pleaseLogin" => "Пожалуйста, войдите в аккаунт",

        // Orders
        "orders" => "Заказы",
        "myOrders" => "Мои заказы",
        "orderDetails" => "Детали заказа",
        "trackOrder" => "Отследить заказ",
        "trackingNumber" => "Трек-номер",
        "estimatedDelivery" => "Ожидаемая доставка",
        "currentLocation" => "Текущее местоположение",
        "sortingCenter" => "Сортировочный центр",
        "cancelOrder" => "Отменить заказ",
        "orderCancelled" => "Заказ отменён",
        "noOrdersFound" => "Заказы не найдены",
        "processing" => "В обработке",
        "shipped" => "Отправлен",
        "delivered" => "Доставлен",
        "cancelled" => "Отменён",

        // Account
        "login" => "Войти",
        "register" => "Регистрация",
        "logout" => "Выйти",
        "loggedOut" => "Вы вышли из аккаунта",
        "email" => "Эл. почта",
        "password" => "Пароль",
        "confirmPassword" => "Подтвердите пароль",
        "name" => "Имя",
        "profile" => "Профиль",
        "editProfile" => "Редактировать профиль",
        "profileUpdated" => "Профиль обновлён",
        "notifications" => "Уведомления",
        "invalidCredentials" => "Неверный email или пароль",
        "emailInUse" => "Этот email уже зарегистрирован",
        "updateFailed" => "Не удалось обновить профиль",
        "pleaseEnterEmail" => "Пожалуйста, введите email",
        "pleaseEnterPassword" => "Пожалуйста, введите пароль",
        "pleaseEnterName" => "Пожалуйста, введите имя",
        "invalidEmail" => "Пожалуйста, введите корректный email",
        "passwordsNotMatch" => "Пароли не совпадают",

        // Preferences
        "language" => "Язык",
        "theme" => "Тема",
        "light" => "Светлая",
        "dark" => "Тёмная",

        // Admin
        "admin" => "Администратор",
        "moderator" => "Модератор",
        "visitor" => "Посетитель",
        "accessDenied" => "Доступ запрещён",
        "noPermission" => "У вас нет прав для этого действия",
        "products" => "Товары",
        "users" => "Пользователи",
        "totalRevenue" => "Общая выручка",
        "productAdded" => "Товар добавлен",
        "productUpdated" => "Товар обновлён",
        "productDeleted" => "Товар удалён",
        // orderStatusUpdated, userUpdated and userDeleted fall back to English
        _ => return None,
    };
    Some(text)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_requested_language() {
        assert_eq!(translate(Language::Ru, "invalidCredentials"), "Неверный email или пароль");
        assert_eq!(translate(Language::En, "invalidCredentials"), "Invalid email or password");
    }

    #[test]
    fn test_translate_falls_back_to_english() {
        assert_eq!(lookup(Language::Ru, "userDeleted"), None);
        assert_eq!(translate(Language::Ru, "userDeleted"), "User deleted");
    }

    #[test]
    fn test_translate_falls_back_to_key() {
        assert_eq!(translate(Language::En, "missingKey"), "missingKey");
        assert_eq!(translate(Language::Ru, ""), "");
    }

    #[test]
    fn test_status_and_role_keys_are_translated() {
        for status in crate::types::OrderStatus::ALL {
            assert!(lookup(Language::En, status.message_key()).is_some());
            assert!(lookup(Language::Ru, status.message_key()).is_some());
        }
        for role in [crate::Role::Admin, crate::Role::Moderator, crate::Role::Visitor] {
            assert!(lookup(Language::Ru, role.as_str()).is_some());
        }
    }

    #[test]
    fn test_language_parse_and_serde() {
        assert_eq!("RU".parse::<Language>().unwrap(), Language::Ru);
        assert!("de".parse::<Language>().is_err());
        assert_eq!(serde_json::to_string(&Language::Ru).unwrap(), "\"ru\"");
    }
}
