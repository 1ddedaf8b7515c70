//! Localized message catalog (Russian / Uzbek)
//!
//! Client-visible strings exist in both locales; staff-facing strings are
//! Russian only. Category display names come from the catalog and stay
//! Russian in both locales.

use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderStatus};

/// Preferred client locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    Uz,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::Uz => "uz",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ru" => Some(Locale::Ru),
            "uz" => Some(Locale::Uz),
            _ => None,
        }
    }
}

// ==================== Keyboard labels ====================

pub const BTN_LANG_RU: &str = "🇷🇺 Русский";
pub const BTN_LANG_UZ: &str = "🇺🇿 O'zbekcha";

pub fn btn_make_order(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "🛒 Сделать заказ",
        Locale::Uz => "🛒 Buyurtma berish",
    }
}

pub fn btn_my_orders(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "📋 Мои заказы",
        Locale::Uz => "📋 Mening buyurtmalarim",
    }
}

pub fn btn_change_language(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "🌐 Изменить язык",
        Locale::Uz => "🌐 Tilni o'zgartirish",
    }
}

// ==================== Status presentation ====================

pub fn status_emoji(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "⏳",
        OrderStatus::Approved => "✅",
        OrderStatus::Rejected => "❌",
    }
}

pub fn status_name(locale: Locale, status: OrderStatus) -> &'static str {
    match (locale, status) {
        (Locale::Ru, OrderStatus::Pending) => "Ожидает одобрения",
        (Locale::Ru, OrderStatus::Approved) => "Одобрен",
        (Locale::Ru, OrderStatus::Rejected) => "Отклонен",
        (Locale::Uz, OrderStatus::Pending) => "Tasdiqlanish kutilmoqda",
        (Locale::Uz, OrderStatus::Approved) => "Tasdiqlangan",
        (Locale::Uz, OrderStatus::Rejected) => "Rad etilgan",
    }
}

/// Thousands-grouped amount without decimals, e.g. `12,500`
pub fn format_money(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn currency(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "сум",
        Locale::Uz => "so'm",
    }
}

// ==================== Conversation texts ====================

pub fn welcome(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "👋 Добро пожаловать в систему заказов!\n\nВыберите язык:",
        Locale::Uz => "👋 Buyurtmalar tizimiga xush kelibsiz!\n\nTilni tanlang:",
    }
}

pub fn choose_language(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "Выберите язык:",
        Locale::Uz => "Tilni tanlang:",
    }
}

pub fn language_saved(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "✅ Язык изменен на русский.\n\nВыберите действие:",
        Locale::Uz => "✅ Til o'zbek tiliga o'zgartirildi.\n\nHarakatni tanlang:",
    }
}

pub fn main_menu(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "Главное меню:",
        Locale::Uz => "Asosiy menyu:",
    }
}

pub fn empty_order(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "❌ Заказ пуст.",
        Locale::Uz => "❌ Buyurtma bo'sh.",
    }
}

pub fn ask_signature(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "📝 Пожалуйста, отправьте вашу подпись (изображение):",
        Locale::Uz => "📝 Iltimos, imzoingizni yuboring (rasm):",
    }
}

pub fn processing(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "⏳ Обрабатываю заказ...",
        Locale::Uz => "⏳ Buyurtma qayta ishlanmoqda...",
    }
}

pub fn generic_failure(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "❌ Произошла ошибка при обработке заказа. Попробуйте позже.",
        Locale::Uz => "❌ Buyurtmani qayta ishlashda xatolik yuz berdi. Keyinroq urinib ko'ring.",
    }
}

/// Bilingual by design: the limiter fires before the locale is known
pub fn throttle_notice() -> &'static str {
    "⚠️ Слишком много запросов. Подождите минуту.\n⚠️ Juda ko'p so'rovlar. Bir daqiqa kuting."
}

pub fn no_orders(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "У вас пока нет заказов.",
        Locale::Uz => "Sizda hali buyurtmalar yo'q.",
    }
}

pub fn my_orders_header(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "📋 Ваши заказы:\n\n",
        Locale::Uz => "📋 Sizning buyurtmalaringiz:\n\n",
    }
}

pub fn my_orders_entry(locale: Locale, order: &Order) -> String {
    format!(
        "🆔 {}\n📅 {}\n💰 {} {}\n{} {}\n\n",
        order.order_id,
        order.created_at,
        format_money(order.total),
        currency(locale),
        status_emoji(order.status),
        status_name(locale, order.status),
    )
}

pub fn my_orders_footer(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "\nДля получения документа заказа используйте:\n/get_doc номер_заказа",
        Locale::Uz => "\nBuyurtma hujjatini olish uchun foydalaning:\n/get_doc buyurtma_raqami",
    }
}

// ==================== Intake / decision texts ====================

pub fn order_created_caption(locale: Locale, order: &Order) -> String {
    let category = order.category;
    match locale {
        Locale::Ru => format!(
            "✅ Заказ оформлен!\n\n🆔 Номер: {}\n{} Категория: {}\n💰 Сумма: {} сум\n\n⏳ Ожидает одобрения администратором.",
            order.order_id,
            category.emoji(),
            category.display_name(),
            format_money(order.total),
        ),
        Locale::Uz => format!(
            "✅ Buyurtma qabul qilindi!\n\n🆔 Raqam: {}\n{} Kategoriya: {}\n💰 Summa: {} so'm\n\n⏳ Administrator tasdiqini kutmoqda.",
            order.order_id,
            category.emoji(),
            category.display_name(),
            format_money(order.total),
        ),
    }
}

pub fn decision_notification(locale: Locale, order: &Order) -> String {
    let category = order.category;
    let head = format!(
        "🆔 {}\n{} {}\n💰 {} {}",
        order.order_id,
        category.emoji(),
        category.display_name(),
        format_money(order.total),
        currency(locale),
    );
    match (locale, order.status) {
        (Locale::Ru, OrderStatus::Rejected) => format!(
            "❌ Заказ отклонен\n\n{head}\n\nК сожалению, ваш заказ был отклонен администратором."
        ),
        (Locale::Uz, OrderStatus::Rejected) => format!(
            "❌ Buyurtma rad etildi\n\n{head}\n\nAfsuski, buyurtmangiz administrator tomonidan rad etildi."
        ),
        (Locale::Ru, _) => format!(
            "✅ Заказ одобрен!\n\n{head}\n\nВаш заказ был одобрен администратором."
        ),
        (Locale::Uz, _) => format!(
            "✅ Buyurtma tasdiqlandi!\n\n{head}\n\nBuyurtmangiz administrator tomonidan tasdiqlandi."
        ),
    }
}

// ==================== Staff-facing texts (Russian) ====================

pub fn staff_new_order(order: &Order, submitter_name: &str) -> String {
    format!(
        "📦 Новый заказ!\n\n🆔 {}\n{} {}\n👤 {}\n📞 {}\n📍 {}\n💰 {} сум\n\n👤 От: {}",
        order.order_id,
        order.category.emoji(),
        order.category.display_name(),
        order.client_name,
        order.client_phone,
        order.client_address,
        format_money(order.total),
        submitter_name,
    )
}

pub fn staff_decided_suffix(status: OrderStatus, role_name: &str) -> String {
    match status {
        OrderStatus::Rejected => format!("\n\n❌ Отклонено ({role_name})"),
        _ => format!("\n\n✅ Одобрено ({role_name})"),
    }
}

pub fn staff_decision_ack(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Rejected => "❌ Заказ отклонен!",
        _ => "✅ Заказ одобрен!",
    }
}

pub fn btn_approve() -> &'static str {
    "✅ Одобрить"
}

pub fn btn_reject() -> &'static str {
    "❌ Отклонить"
}

pub fn staff_no_permission() -> &'static str {
    "❌ У вас нет прав для обработки заказов."
}

pub fn staff_order_not_found() -> &'static str {
    "❌ Заказ не найден."
}

pub fn staff_already_decided() -> &'static str {
    "❌ Заказ уже обработан."
}

pub fn staff_action_failed() -> &'static str {
    "❌ Не удалось обработать заказ. Попробуйте позже."
}

pub fn staff_startup(sales_count: usize) -> String {
    format!(
        "🤖 Бот запущен!\n\nСупер-админ: 1\nОтдел продаж: {sales_count}\n\n✨ Процесс заказа: одобрение/отклонение администратором"
    )
}

pub fn staff_shutdown() -> &'static str {
    "🛑 Бот остановлен"
}

// ==================== Operator command texts (Russian) ====================

pub fn export_empty() -> &'static str {
    "В базе нет заказов."
}

pub fn export_caption() -> &'static str {
    "Экспорт заказов (CSV)"
}

pub fn sendall_usage() -> &'static str {
    "Использование: /sendall текст"
}

pub fn sendall_no_users() -> &'static str {
    "Нет пользователей."
}

pub fn sendall_report(succeeded: usize, failed: usize) -> String {
    format!("✅ Отправлено: {succeeded}\n❌ Не доставлено: {failed}")
}

// ==================== Document fetch texts ====================

pub fn get_doc_usage(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "Использование: /get_doc <номер_заказа>",
        Locale::Uz => "Foydalanish: /get_doc <buyurtma_raqami>",
    }
}

pub fn order_not_found(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "Заказ не найден.",
        Locale::Uz => "Buyurtma topilmadi.",
    }
}

pub fn doc_unavailable(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "Документ не доступен.",
        Locale::Uz => "Hujjat mavjud emas.",
    }
}

pub fn doc_caption(locale: Locale, order_id: &str) -> String {
    match locale {
        Locale::Ru => format!("Документ заказа №{order_id}"),
        Locale::Uz => format!("Buyurtma №{order_id} hujjati"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_round_trip() {
        assert_eq!(Locale::parse("ru"), Some(Locale::Ru));
        assert_eq!(Locale::parse("uz"), Some(Locale::Uz));
        assert_eq!(Locale::parse("en"), None);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0");
        assert_eq!(format_money(999.0), "999");
        assert_eq!(format_money(1000.0), "1,000");
        assert_eq!(format_money(1234567.4), "1,234,567");
        assert_eq!(format_money(-1500.0), "-1,500");
    }
}
