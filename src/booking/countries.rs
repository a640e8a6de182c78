/// Calling code preselected on the booking form.
pub const DEFAULT_CALLING_CODE: &str = "1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallingCode {
    pub code: &'static str,
    pub flag: &'static str,
    pub name: &'static str,
}

const fn cc(code: &'static str, flag: &'static str, name: &'static str) -> CallingCode {
    CallingCode { code, flag, name }
}

/// Calling codes the consultant accepts phone bookings from, sorted by country name.
pub const SUPPORTED: &[CallingCode] = &[
    cc("355", "🇦🇱", "Albania"),
    cc("376", "🇦🇩", "Andorra"),
    cc("374", "🇦🇲", "Armenia"),
    cc("61", "🇦🇺", "Australia"),
    cc("43", "🇦🇹", "Austria"),
    cc("32", "🇧🇪", "Belgium"),
    cc("387", "🇧🇦", "Bosnia Herzegovina"),
    cc("359", "🇧🇬", "Bulgaria"),
    cc("385", "🇭🇷", "Croatia"),
    cc("357", "🇨🇾", "Cyprus"),
    cc("420", "🇨🇿", "Czech Republic"),
    cc("45", "🇩🇰", "Denmark"),
    cc("372", "🇪🇪", "Estonia"),
    cc("358", "🇫🇮", "Finland"),
    cc("33", "🇫🇷", "France"),
    cc("995", "🇬🇪", "Georgia"),
    cc("49", "🇩🇪", "Germany"),
    cc("30", "🇬🇷", "Greece"),
    cc("852", "🇭🇰", "Hong Kong"),
    cc("36", "🇭🇺", "Hungary"),
    cc("354", "🇮🇸", "Iceland"),
    cc("91", "🇮🇳", "India"),
    cc("353", "🇮🇪", "Ireland"),
    cc("972", "🇮🇱", "Israel"),
    cc("39", "🇮🇹", "Italy"),
    cc("81", "🇯🇵", "Japan"),
    cc("371", "🇱🇻", "Latvia"),
    cc("423", "🇱🇮", "Liechtenstein"),
    cc("370", "🇱🇹", "Lithuania"),
    cc("352", "🇱🇺", "Luxembourg"),
    cc("356", "🇲🇹", "Malta"),
    cc("373", "🇲🇩", "Moldova"),
    cc("377", "🇲🇨", "Monaco"),
    cc("382", "🇲🇪", "Montenegro"),
    cc("31", "🇳🇱", "Netherlands"),
    cc("64", "🇳🇿", "New Zealand"),
    cc("389", "🇲🇰", "North Macedonia"),
    cc("47", "🇳🇴", "Norway"),
    cc("48", "🇵🇱", "Poland"),
    cc("351", "🇵🇹", "Portugal"),
    cc("40", "🇷🇴", "Romania"),
    cc("378", "🇸🇲", "San Marino"),
    cc("381", "🇷🇸", "Serbia"),
    cc("65", "🇸🇬", "Singapore"),
    cc("421", "🇸🇰", "Slovakia"),
    cc("386", "🇸🇮", "Slovenia"),
    cc("82", "🇰🇷", "South Korea"),
    cc("34", "🇪🇸", "Spain"),
    cc("46", "🇸🇪", "Sweden"),
    cc("41", "🇨🇭", "Switzerland"),
    cc("90", "🇹🇷", "Turkey"),
    cc("971", "🇦🇪", "UAE Dubai"),
    cc("380", "🇺🇦", "Ukraine"),
    cc("44", "🇬🇧", "United Kingdom"),
    cc("1", "🇺🇸", "United States Canada"),
];

pub fn find(code: &str) -> Option<&'static CallingCode> {
    let code = code.trim().trim_start_matches('+');
    SUPPORTED.iter().find(|c| c.code == code)
}

pub fn is_supported(code: &str) -> bool {
    find(code).is_some()
}

/// Longest supported calling code that prefixes `digits`.
pub fn match_prefix(digits: &str) -> Option<&'static CallingCode> {
    SUPPORTED
        .iter()
        .filter(|c| digits.starts_with(c.code))
        .max_by_key(|c| c.code.len())
}
