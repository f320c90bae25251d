// A language the gateway accepts, with the code OCR.space expects for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    // Short code used by clients of this service.
    pub code: &'static str,
    // Human-readable name shown in the front-end selector.
    pub name: &'static str,
    // Three-letter (or script-qualified) code understood by OCR.space.
    pub ocr_space_code: &'static str,
}

pub const DEFAULT_LANGUAGE_CODE: &str = "de";

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English", ocr_space_code: "eng" },
    Language { code: "ru", name: "Russian", ocr_space_code: "rus" },
    Language { code: "de", name: "German", ocr_space_code: "ger" },
    Language { code: "fr", name: "French", ocr_space_code: "fre" },
    Language { code: "es", name: "Spanish", ocr_space_code: "spa" },
    Language { code: "it", name: "Italian", ocr_space_code: "ita" },
    Language { code: "pt", name: "Portuguese", ocr_space_code: "por" },
    Language { code: "nl", name: "Dutch", ocr_space_code: "dut" },
    Language { code: "pl", name: "Polish", ocr_space_code: "pol" },
    Language { code: "uk", name: "Ukrainian", ocr_space_code: "ukr" },
    Language { code: "ja", name: "Japanese", ocr_space_code: "jpn" },
    Language { code: "ko", name: "Korean", ocr_space_code: "kor" },
    Language { code: "zh", name: "Chinese", ocr_space_code: "chi_sim" },
    Language { code: "ar", name: "Arabic", ocr_space_code: "ara" },
];

// Codes are matched case-insensitively after trimming.
pub fn find_language(code: &str) -> Option<&'static Language> {
    let code = code.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|language| language.code.eq_ignore_ascii_case(code))
}
