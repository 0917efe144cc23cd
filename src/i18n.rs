//! Turkish/English string tables
//!
//! `translate` is total: an unknown key comes back unchanged, so a missing
//! entry shows up on screen as its key instead of as an empty label.

use serde::{Deserialize, Serialize};

use crate::sim::ItemType;

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Tr,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Tr => "tr",
            Language::En => "en",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tr" | "turkish" | "türkçe" => Some(Language::Tr),
            "en" | "english" => Some(Language::En),
            _ => None,
        }
    }

    /// Name shown on the language toggle
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::Tr => "TÜRKÇE",
            Language::En => "ENGLISH",
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::Tr => TR,
            Language::En => EN,
        }
    }
}

/// Look up `key` in the table for `lang`, falling back to the key itself
pub fn translate(key: &str, lang: Language) -> &str {
    lang.table()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| *text)
        .unwrap_or(key)
}

/// Localized display name of an inventory item
pub fn item_label(item: ItemType, lang: Language) -> &'static str {
    translate(item.label_key(), lang)
}

const TR: &[(&str, &str)] = &[
    // Menu
    ("menu_play", "OYNA"),
    ("menu_settings", "AYARLAR"),
    ("menu_credits", "YAPIMCILAR"),
    ("menu_exit", "OYUNDAN ÇIK"),
    ("chapter_select", "BÖLÜM SEÇ"),
    ("chapter_1_title", "BÖLÜM 1"),
    ("chapter_1_sub", "SONSUZ DÖNGÜ"),
    ("chapter_2_title", "BÖLÜM 2"),
    ("chapter_2_sub", "BODRUM (KİLİTLİ)"),
    ("chapter_3_title", "BÖLÜM 3"),
    ("chapter_3_sub", "ÇATI KATI (KİLİTLİ)"),
    ("back", "GERİ DÖN"),
    ("settings_title", "AYARLAR"),
    ("sensitivity", "HASSASİYET"),
    ("volume", "SES"),
    ("language", "DİL / LANGUAGE"),
    ("credits_title", "YAPIMCILAR"),
    ("exit_screen_msg", "ARKANA BAKMA..."),
    ("return_menu", "MENÜYE DÖN"),
    ("game_over_title", "GEBERDİN"),
    ("game_over_sub", "AĞLA😂🫵"),
    ("try_again", "TEKRAR DENE"),
    // Game UI
    ("rooftop", "ÇATI KATI"),
    ("floor", "KAT"),
    ("electrical_room", "ELEKTRİK DAİRESİ"),
    ("task_cable", "Görev: Kabloları Tamir Et"),
    ("inventory", "Envanter:"),
    ("inventory_empty", "Boş"),
    ("interact", "ETKİLEŞİM"),
    ("exit", "ÇIKIŞ"),
    ("stairs_down", "MERDİVENLER (ALT KAT)"),
    ("ghost_name", "HAYALET"),
    ("monkey_name", "ZİLLİ MAYMUN"),
    ("cable_box", "KABLO KUTUSU"),
    // Notifications
    ("found_roof_key", "ANAHTAR BULUNDU: ÇATI KAPISI"),
    ("door_opening", "KAPI AÇILIYOR..."),
    ("locked_need_key", "KİLİTLİ! Anahtarı bulmalısın."),
    ("room_opened", "DAİRE AÇILDI."),
    ("room_locked", "KİLİTLİ. Anahtar lazım."),
    ("drawer_searched", "Buraya zaten baktın."),
    ("drawer_empty", "Boş..."),
    ("found_room_key", "Daire Anahtarı Buldun."),
    ("cable_fixed", "KABLO TAMİR EDİLDİ"),
    ("escape_success", "KAÇIŞ BAŞARILI!"),
    ("fix_first", "ÖNCE ELEKTRİKLERİ TAMİR ET!"),
    ("floor_descended", "ALT KATA İNDİN"),
    // Items
    ("item_KEY_ROOF", "Çatı Anahtarı"),
    ("item_KEY_ROOM", "Daire Anahtarı"),
    ("item_KEY_NEXT_FLOOR", "Alt Kat Anahtarı"),
    ("item_MONEY", "Para"),
    ("item_WEAPON_CROWBAR", "Levye"),
    ("item_WEAPON_GUN", "Tabanca"),
];

const EN: &[(&str, &str)] = &[
    // Menu
    ("menu_play", "PLAY"),
    ("menu_settings", "SETTINGS"),
    ("menu_credits", "CREDITS"),
    ("menu_exit", "EXIT GAME"),
    ("chapter_select", "SELECT CHAPTER"),
    ("chapter_1_title", "CHAPTER 1"),
    ("chapter_1_sub", "INFINITE LOOP"),
    ("chapter_2_title", "CHAPTER 2"),
    ("chapter_2_sub", "BASEMENT (LOCKED)"),
    ("chapter_3_title", "CHAPTER 3"),
    ("chapter_3_sub", "ROOFTOP (LOCKED)"),
    ("back", "GO BACK"),
    ("settings_title", "SETTINGS"),
    ("sensitivity", "SENSITIVITY"),
    ("volume", "VOLUME"),
    ("language", "LANGUAGE / DİL"),
    ("credits_title", "CREDITS"),
    ("exit_screen_msg", "DON'T LOOK BEHIND YOU..."),
    ("return_menu", "RETURN TO MENU"),
    ("game_over_title", "YOU DIED"),
    ("game_over_sub", "CRY ABOUT IT😂🫵"),
    ("try_again", "TRY AGAIN"),
    // Game UI
    ("rooftop", "ROOFTOP"),
    ("floor", "FLOOR"),
    ("electrical_room", "ELECTRICAL ROOM"),
    ("task_cable", "Task: Fix Cables"),
    ("inventory", "Inventory:"),
    ("inventory_empty", "Empty"),
    ("interact", "INTERACT"),
    ("exit", "EXIT"),
    ("stairs_down", "STAIRS (DOWN)"),
    ("ghost_name", "GHOST"),
    ("monkey_name", "CYMBAL MONKEY"),
    ("cable_box", "CABLE BOX"),
    // Notifications
    ("found_roof_key", "KEY FOUND: ROOF DOOR"),
    ("door_opening", "DOOR OPENING..."),
    ("locked_need_key", "LOCKED! You need the key."),
    ("room_opened", "ROOM OPENED."),
    ("room_locked", "LOCKED. Need key."),
    ("drawer_searched", "Already searched here."),
    ("drawer_empty", "Empty..."),
    ("found_room_key", "Found Room Key."),
    ("cable_fixed", "CABLE FIXED"),
    ("escape_success", "ESCAPE SUCCESSFUL!"),
    ("fix_first", "FIX ELECTRICITY FIRST!"),
    ("floor_descended", "DESCENDED TO FLOOR"),
    // Items
    ("item_KEY_ROOF", "Roof Key"),
    ("item_KEY_ROOM", "Room Key"),
    ("item_KEY_NEXT_FLOOR", "Next Floor Key"),
    ("item_MONEY", "Money"),
    ("item_WEAPON_CROWBAR", "Crowbar"),
    ("item_WEAPON_GUN", "Gun"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys() {
        assert_eq!(translate("menu_play", Language::En), "PLAY");
        assert_eq!(translate("menu_play", Language::Tr), "OYNA");
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(translate("no_such_key", Language::En), "no_such_key");
        assert_eq!(translate("", Language::Tr), "");
    }

    #[test]
    fn test_tables_have_the_same_keys() {
        assert_eq!(TR.len(), EN.len());
        for (key, _) in TR {
            assert!(EN.iter().any(|(k, _)| k == key), "missing en entry for {key}");
        }
    }

    #[test]
    fn test_item_labels() {
        assert_eq!(item_label(ItemType::KeyRoof, Language::En), "Roof Key");
        assert_eq!(item_label(ItemType::WeaponGun, Language::Tr), "Tabanca");
    }

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::from_str("EN"), Some(Language::En));
        assert_eq!(Language::from_str("tr"), Some(Language::Tr));
        assert_eq!(Language::from_str("de"), None);
    }

    #[test]
    fn test_native_names() {
        assert_eq!(Language::Tr.native_name(), "TÜRKÇE");
        assert_eq!(Language::En.native_name(), "ENGLISH");
    }
}
