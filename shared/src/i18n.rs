use serde::{Deserialize, Serialize};

/// Languages the admin console is shipped in
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl Locale {
    /// Parses a language tag such as `ko-KR` or `en`; unknown tags fall back to Korean
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(&['-', '_'][..]).next().unwrap_or_default().to_ascii_lowercase();
        match primary.as_str() {
            "en" => Locale::En,
            _ => Locale::Ko,
        }
    }
}

/// Status texts shown in the match creation output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchAdminMessages {
    locale: Locale,
}

impl MatchAdminMessages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn selection_required(&self) -> String {
        match self.locale {
            Locale::Ko => "사용자/전문가 선택 필요!".to_string(),
            Locale::En => "Select at least one user and an expert!".to_string(),
        }
    }

    pub fn created(&self, count: u32) -> String {
        match self.locale {
            Locale::Ko => format!("{}건 매칭 생성 완료!", count),
            Locale::En => format!("{} match(es) created.", count),
        }
    }

    pub fn load_failed(&self, reason: &str) -> String {
        match self.locale {
            Locale::Ko => format!("미매칭 사용자 목록을 불러오지 못했습니다: {}", reason),
            Locale::En => format!("Could not load unmatched users: {}", reason),
        }
    }

    pub fn create_failed(&self, reason: &str) -> String {
        match self.locale {
            Locale::Ko => format!("매칭 생성 중 오류가 발생했습니다: {}", reason),
            Locale::En => format!("Match creation failed: {}", reason),
        }
    }

    pub fn expert_placeholder(&self) -> String {
        match self.locale {
            Locale::Ko => "--- 전문가 선택 ---".to_string(),
            Locale::En => "--- Select expert ---".to_string(),
        }
    }

    pub fn create_button(&self) -> String {
        match self.locale {
            Locale::Ko => "매칭 생성".to_string(),
            Locale::En => "Create match".to_string(),
        }
    }

    pub fn search_placeholder(&self) -> String {
        match self.locale {
            Locale::Ko => "이메일 또는 ID 검색".to_string(),
            Locale::En => "Search by email or ID".to_string(),
        }
    }

    pub fn no_unmatched_users(&self) -> String {
        match self.locale {
            Locale::Ko => "미매칭 사용자가 없습니다.".to_string(),
            Locale::En => "No unmatched users.".to_string(),
        }
    }
}

impl Default for MatchAdminMessages {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
