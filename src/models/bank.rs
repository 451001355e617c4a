use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Banks recognised from the shape of an account number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bank {
    KakaoBank,
    TossBank,
    Woori,
    Shinhan,
    Kookmin,
    Nonghyup,
    Hana,
    Ibk,
}

impl Bank {
    pub fn name(&self) -> &'static str {
        match self {
            Bank::KakaoBank => "카카오뱅크",
            Bank::TossBank => "토스뱅크",
            Bank::Woori => "우리은행",
            Bank::Shinhan => "신한은행",
            Bank::Kookmin => "KB국민은행",
            Bank::Nonghyup => "NH농협은행",
            Bank::Hana => "하나은행",
            Bank::Ibk => "IBK기업은행",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Bank::KakaoBank => "kakao",
            Bank::TossBank => "toss",
            Bank::Woori => "woori",
            Bank::Shinhan => "shinhan",
            Bank::Kookmin => "kb",
            Bank::Nonghyup => "nh",
            Bank::Hana => "hana",
            Bank::Ibk => "ibk",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "kakao" => Some(Bank::KakaoBank),
            "toss" => Some(Bank::TossBank),
            "woori" => Some(Bank::Woori),
            "shinhan" => Some(Bank::Shinhan),
            "kb" => Some(Bank::Kookmin),
            "nh" => Some(Bank::Nonghyup),
            "hana" => Some(Bank::Hana),
            "ibk" => Some(Bank::Ibk),
            _ => None,
        }
    }
}

/// Rules are tried in order; the first match wins, so the more specific
/// prefixes come before the generic length-only ones.
fn rules() -> &'static [(Regex, Bank)] {
    static RULES: OnceLock<Vec<(Regex, Bank)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (r"^3333\d{9}$", Bank::KakaoBank),
            (r"^1000\d{8}$", Bank::TossBank),
            (r"^1002\d{9}$", Bank::Woori),
            (r"^1[01]0\d{9}$", Bank::Shinhan),
            (r"^3(0[12]|5[12])\d{10}$", Bank::Nonghyup),
            (r"^\d{3}9\d{10}$", Bank::Hana),
            (r"^\d{9}0[1-9]\d{3}$", Bank::Ibk),
            (r"^\d{14}$", Bank::Kookmin),
        ]
        .into_iter()
        .filter_map(|(pattern, bank)| Regex::new(pattern).ok().map(|re| (re, bank)))
        .collect()
    })
}

/// Guess the bank from an account number such as `3333-01-1234567`.
///
/// Separators are ignored. Unknown shapes return `None`.
pub fn detect_bank(account: &str) -> Option<Bank> {
    let digits: String = account.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    rules()
        .iter()
        .find(|(re, _)| re.is_match(&digits))
        .map(|(_, bank)| *bank)
}
