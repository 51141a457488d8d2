use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// 主菜单:分享按钮 + 三个查询入口
pub fn main_menu(invite_link: &str) -> InlineKeyboardMarkup {
    let mut rows = Vec::new();

    if let Ok(url) = invite_link.parse() {
        rows.push(vec![InlineKeyboardButton::url("🔗 分享邀请链接", url)]);
    }

    rows.push(vec![
        InlineKeyboardButton::callback("📊 邀请统计", "menu:stats"),
        InlineKeyboardButton::callback("👥 我的邀请", "menu:referrals"),
    ]);
    rows.push(vec![InlineKeyboardButton::callback("❓ 帮助", "menu:help")]);

    InlineKeyboardMarkup::new(rows)
}
