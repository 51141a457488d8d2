use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug)]
pub struct RegexPatterns {
    pub start_command_regex: Regex,
    pub referral_code_regex: Regex,
}

impl RegexPatterns {
    pub fn new() -> Self {
        Self {
            // 匹配 /start 命令及其可选参数，兼容 /start@BotName 形式
            start_command_regex: Regex::new(r"^/start(?:@\w+)?(?:$|\s+(\S+))").unwrap(),
            // 邀请码必须是纯十进制数字
            referral_code_regex: Regex::new(r"^\d+$").unwrap(),
        }
    }

    pub fn get_instance() -> &'static Self {
        static INSTANCE: OnceLock<RegexPatterns> = OnceLock::new();
        INSTANCE.get_or_init(RegexPatterns::new)
    }
}

impl Default for RegexPatterns {
    fn default() -> Self {
        Self::new()
    }
}
