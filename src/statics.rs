// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "BFCE: Battlefield 6 Config Editor";

pub const EN_HOME_HEADING: &str = "BATTLEFIELD 6";
pub const EN_HOME_SUBHEADING: &str = "CONFIG EDITOR";
pub const EN_HOME_STEP: &str = "STEP 1: UPLOAD CONFIG FILE";
pub const EN_HOME_INSTRUCTIONS: &str =
    "Upload your Battlefield 6 configuration file (.cfg or .txt, or PROFSAVE_profile)";
pub const EN_HOME_DROP: &str = "Drop config file here";
pub const EN_HOME_DROP_HOVER: &str = "Release to load";
pub const EN_HOME_OR_BROWSE: &str = "or click to browse";
pub const EN_HOME_FORMATS: &str = "SUPPORTED FORMATS: .cfg, .txt, PROFSAVE_profile";
pub const EN_HOME_LOCATION: &str = "LOCATION: Documents/Battlefield 6/settings/";

pub const EN_BTN_SELECT_FILE: &str = "SELECT FILE";
pub const EN_BTN_EXPORT: &str = "EXPORT";
pub const EN_BTN_BACK: &str = "<- Back";
pub const EN_BTN_CLEAR: &str = "Clear";
pub const EN_BTN_TOGGLE_THEME: &str = "Theme";

pub const EN_HEADING_CATEGORIES: &str = "CATEGORIES";
pub const EN_HEADING_SEARCH_RESULTS: &str = "SEARCH RESULTS";
pub const EN_CATEGORY_ALL: &str = "All Settings";

pub const EN_HINT_SEARCH: &str = "Search settings...";
pub const EN_LABEL_SETTINGS_COUNT: &str = "SETTINGS";
pub const EN_SEARCH_NO_MATCHES: &str = "No settings found";
pub const EN_SETTING_DESCRIPTION: &str = "Configuration parameter";

pub const EN_COL_KEY: &str = "Key";
pub const EN_COL_VALUE: &str = "Value";

pub const EN_BADGE_DIRTY: &str = "modified";
pub const EN_LABEL_CATEGORIES_COUNT: &str = "categories:";
pub const EN_LABEL_SETTINGS_TOTAL: &str = "settings:";

pub const EN_DIALOG_FILTER: &str = "Battlefield 6 Config";
pub const EN_DIALOG_FILTER_ALL: &str = "All files";

// Newline constants (used for export formatting).
pub const NL_LF: &str = "\n";
pub const NL_CRLF: &str = "\r\n";

// Profile text format (CFG_ prefix)
pub const CFG_COMMENT_PREFIXES: [&str; 2] = ["//", "#"];
pub const CFG_MISSING_VALUE: &str = "None";
pub const CFG_FILE_EXTENSIONS: [&str; 2] = ["cfg", "txt"];
pub const CFG_PROFSAVE_PREFIX: &str = "PROFSAVE";
pub const CFG_DEFAULT_EXPORT_NAME: &str = "config.cfg";

// Local storage.
pub const APP_DIR_NAME: &str = "bfce";
pub const CACHE_FILE_NAME: &str = "profile-cache.json";
