use crate::parser::regex::RegexPatterns;
use log::debug;

#[derive(Clone, Debug)]
pub struct PayloadParser {
    patterns: &'static RegexPatterns,
}

impl PayloadParser {
    pub fn new() -> Self {
        Self {
            patterns: RegexPatterns::get_instance(),
        }
    }

    /// 从 /start 消息文本中提取深链参数
    pub fn extract_start_payload(&self, text: &str) -> Option<String> {
        let payload = self
            .patterns
            .start_command_regex
            .captures(text.trim())?
            .get(1)?
            .as_str()
            .to_string();
        debug!("Extracted start payload: {payload}");

        Some(payload)
    }

    /// 解析邀请码。缺失、非数字或溢出都降级为"无邀请人"，从不报错。
    pub fn parse_referral_code(&self, code: &str) -> Option<i64> {
        let code = code.trim();
        if !self.patterns.referral_code_regex.is_match(code) {
            debug!("Referral code is not numeric, ignoring: {code}");
            return None;
        }

        code.parse::<i64>().ok()
    }

    pub fn is_start_command(&self, text: &str) -> bool {
        self.patterns.start_command_regex.is_match(text.trim())
    }
}

impl Default for PayloadParser {
    fn default() -> Self {
        Self::new()
    }
}
