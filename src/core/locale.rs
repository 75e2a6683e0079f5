//! Locale registry.
//!
//! A read-only table mapping locale codes to their `Plural-Forms` expression, plural arity
//! and writing direction. The table is a `static` slice, so it exists for
//! the whole process and is never mutated.

use crate::core::error::UnknownLocale;

#[derive(Debug, PartialEq)]
pub struct Locale {
    pub code: &'static str,
    pub name: &'static str,
    pub nplurals: usize,
    /// C-style expression written into `Plural-Forms`.
    pub plural_expression: &'static str,
    pub rtl: bool,
}

impl Locale {
    /// Value for the `Plural-Forms` header field.
    pub fn plural_forms(&self) -> String {
        format!(
            "nplurals={}; plural={};",
            self.nplurals, self.plural_expression
        )
    }
}

const NONE: &str = "0";
const GERMANIC: &str = "(n != 1)";
const FRENCH: &str = "(n > 1)";
const ARABIC: &str = "n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 && n%100<=99 ? 4 : 5";
const EAST_SLAVIC: &str = "(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2)";
const POLISH: &str =
    "(n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2)";
const CZECH: &str = "(n==1) ? 0 : (n>=2 && n<=4) ? 1 : 2";
const ROMANIAN: &str = "(n==1 ? 0 : (n==0 || (n%100 > 0 && n%100 < 20)) ? 1 : 2)";
const LITHUANIAN: &str = "(n%10==1 && n%100!=11 ? 0 : n%10>=2 && (n%100<10 || n%100>=20) ? 1 : 2)";
const LATVIAN: &str = "(n%10==1 && n%100!=11 ? 0 : n != 0 ? 1 : 2)";
const SLOVENIAN: &str = "(n%100==1 ? 0 : n%100==2 ? 1 : n%100==3 || n%100==4 ? 2 : 3)";
const MACEDONIAN: &str = "(n%10==1 && n%100!=11 ? 0 : 1)";

macro_rules! locale {
    ($code:literal, $name:literal, $n:literal, $expr:expr, $rtl:literal) => {
        Locale {
            code: $code,
            name: $name,
            nplurals: $n,
            plural_expression: $expr,
            rtl: $rtl,
        }
    };
}

/// The languages Odoo ships translations for.
static LOCALES: &[Locale] = &[
    locale!("am", "Amharic", 2, FRENCH, false),
    locale!("ar", "Arabic", 6, ARABIC, true),
    locale!("az", "Azerbaijani", 2, GERMANIC, false),
    locale!("be", "Belarusian", 3, EAST_SLAVIC, false),
    locale!("bg", "Bulgarian", 2, GERMANIC, false),
    locale!("bn", "Bengali", 2, GERMANIC, false),
    locale!("bs", "Bosnian", 3, EAST_SLAVIC, false),
    locale!("ca", "Catalan", 2, GERMANIC, false),
    locale!("cs", "Czech", 3, CZECH, false),
    locale!("da", "Danish", 2, GERMANIC, false),
    locale!("de", "German", 2, GERMANIC, false),
    locale!("el", "Greek", 2, GERMANIC, false),
    locale!("en", "English", 2, GERMANIC, false),
    locale!("es", "Spanish", 2, GERMANIC, false),
    locale!("et", "Estonian", 2, GERMANIC, false),
    locale!("eu", "Basque", 2, GERMANIC, false),
    locale!("fa", "Persian", 2, FRENCH, true),
    locale!("fi", "Finnish", 2, GERMANIC, false),
    locale!("fr", "French", 2, FRENCH, false),
    locale!("gl", "Galician", 2, GERMANIC, false),
    locale!("gu", "Gujarati", 2, GERMANIC, false),
    locale!("he", "Hebrew", 2, GERMANIC, true),
    locale!("hi", "Hindi", 2, GERMANIC, false),
    locale!("hr", "Croatian", 3, EAST_SLAVIC, false),
    locale!("hu", "Hungarian", 2, GERMANIC, false),
    locale!("hy", "Armenian", 2, FRENCH, false),
    locale!("id", "Indonesian", 1, NONE, false),
    locale!("it", "Italian", 2, GERMANIC, false),
    locale!("ja", "Japanese", 1, NONE, false),
    locale!("ka", "Georgian", 2, GERMANIC, false),
    locale!("kk", "Kazakh", 2, GERMANIC, false),
    locale!("km", "Khmer", 1, NONE, false),
    locale!("ko", "Korean", 1, NONE, false),
    locale!("lb", "Luxembourgish", 2, GERMANIC, false),
    locale!("lo", "Lao", 1, NONE, false),
    locale!("lt", "Lithuanian", 3, LITHUANIAN, false),
    locale!("lv", "Latvian", 3, LATVIAN, false),
    locale!("mk", "Macedonian", 2, MACEDONIAN, false),
    locale!("mn", "Mongolian", 2, GERMANIC, false),
    locale!("ms", "Malay", 1, NONE, false),
    locale!("my", "Burmese", 1, NONE, false),
    locale!("nb", "Norwegian Bokmål", 2, GERMANIC, false),
    locale!("nl", "Dutch", 2, GERMANIC, false),
    locale!("pl", "Polish", 3, POLISH, false),
    locale!("pt", "Portuguese", 2, GERMANIC, false),
    locale!("pt_BR", "Portuguese (Brazil)", 2, FRENCH, false),
    locale!("ro", "Romanian", 3, ROMANIAN, false),
    locale!("ru", "Russian", 3, EAST_SLAVIC, false),
    locale!("sk", "Slovak", 3, CZECH, false),
    locale!("sl", "Slovenian", 4, SLOVENIAN, false),
    locale!("sq", "Albanian", 2, GERMANIC, false),
    locale!("sr", "Serbian", 3, EAST_SLAVIC, false),
    locale!("sv", "Swedish", 2, GERMANIC, false),
    locale!("sw", "Swahili", 2, GERMANIC, false),
    locale!("ta", "Tamil", 2, GERMANIC, false),
    locale!("te", "Telugu", 2, GERMANIC, false),
    locale!("th", "Thai", 1, NONE, false),
    locale!("tl", "Tagalog", 2, FRENCH, false),
    locale!("tr", "Turkish", 2, GERMANIC, false),
    locale!("uk", "Ukrainian", 3, EAST_SLAVIC, false),
    locale!("ur", "Urdu", 2, GERMANIC, true),
    locale!("vi", "Vietnamese", 1, NONE, false),
    locale!("zh_CN", "Chinese (Simplified)", 1, NONE, false),
    locale!("zh_HK", "Chinese (Hong Kong)", 1, NONE, false),
    locale!("zh_TW", "Chinese (Traditional)", 1, NONE, false),
];

/// All registered locales.
pub fn all() -> &'static [Locale] {
    LOCALES
}

/// Look up a locale code.
///
/// `pt-BR` and `pt_br` resolve like `pt_BR`; a regional code without its own
/// row (`ar_SA`, `fr_CA`) falls back to its base language.
pub fn lookup(code: &str) -> Result<&'static Locale, UnknownLocale> {
    let normalized = code.trim().replace('-', "_");
    // `sr@latin` shares its plural rule with `sr`.
    let normalized = normalized.split('@').next().unwrap_or_default().to_string();
    if normalized.is_empty() {
        return Err(UnknownLocale(code.to_string()));
    }

    let exact = |candidate: &str| {
        LOCALES
            .iter()
            .find(|l| l.code.eq_ignore_ascii_case(candidate))
    };

    if let Some(locale) = exact(&normalized) {
        return Ok(locale);
    }
    if let Some((base, _)) = normalized.split_once('_')
        && let Some(locale) = exact(base)
    {
        return Ok(locale);
    }
    // zh without a region has no single rule row; default to simplified.
    if normalized.eq_ignore_ascii_case("zh") {
        return exact("zh_CN").ok_or_else(|| UnknownLocale(code.to_string()));
    }
    Err(UnknownLocale(code.to_string()))
}
