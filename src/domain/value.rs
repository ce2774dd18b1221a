use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::validation::ValidationError;

#[allow(clippy::expect_used)] // good regex, it doesn't panic
static INTERNATIONAL_MSISDN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^62[1-9][0-9]{1,2}[0-9]{6,8}$").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static INTERNATIONAL_PLUS_MSISDN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+62[1-9][0-9]{1,2}[0-9]{6,8}$").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static LOCAL_MSISDN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0[1-9][0-9]{1,2}[0-9]{6,8}$").expect("static regex should not panic")
});

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Indonesian mobile number in the local form Zenziva expects (`nohp`).
///
/// Invariant: `0` + area code (2-3 digits, first digit 1-9) + subscriber number
/// (6-8 digits).
pub struct Msisdn(String);

impl Msisdn {
    /// Query parameter name used by Zenziva (`nohp`).
    pub const FIELD: &'static str = "nohp";

    /// Validate and normalize a phone number.
    ///
    /// Surrounding whitespace is ignored, so `" 0811234567\n"` is accepted.
    /// A rejected input is reported as given, untrimmed.
    ///
    /// Accepted shapes:
    /// - `62…` (international without plus), rewritten to `0…`,
    /// - `+62…` (international), rewritten to `0…`,
    /// - `0…` (local), kept as-is.
    ///
    /// Anything else, including inputs with the right prefix but the wrong digit
    /// count, yields [`ValidationError::InvalidMsisdn`].
    pub fn normalize(input: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = input.as_ref().trim();

        let local = if INTERNATIONAL_MSISDN.is_match(trimmed) {
            format!("0{}", &trimmed[2..])
        } else if INTERNATIONAL_PLUS_MSISDN.is_match(trimmed) {
            format!("0{}", &trimmed[3..])
        } else {
            trimmed.to_owned()
        };

        if LOCAL_MSISDN.is_match(&local) {
            return Ok(Self(local));
        }

        Err(ValidationError::InvalidMsisdn {
            input: input.as_ref().to_owned(),
        })
    }

    /// Normalized local form, as sent to Zenziva.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The same number with the Indonesian country code instead of the trunk `0`.
    pub fn international(&self) -> String {
        format!("62{}", &self.0[1..])
    }
}

impl fmt::Display for Msisdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// One-time password sent through `smsotp.php` (`kode_otp`).
///
/// Invariant: `4..=8` bytes after trimming ASCII whitespace. Length is
/// measured in bytes, so a non-ASCII code counts its UTF-8 encoding, and
/// Unicode whitespace such as NBSP is part of the code.
pub struct OtpCode(String);

impl OtpCode {
    /// Query parameter name used by Zenziva (`kode_otp`).
    pub const FIELD: &'static str = "kode_otp";

    /// Minimum allowed code length.
    pub const MIN_LEN: usize = 4;
    /// Maximum allowed code length.
    pub const MAX_LEN: usize = 8;

    /// Create a validated OTP code. Surrounding ASCII whitespace is dropped.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value
            .as_ref()
            .trim_matches(|c: char| c.is_ascii_whitespace());
        let len = trimmed.len();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(ValidationError::OtpCodeLength {
                min: Self::MIN_LEN,
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the trimmed code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`pesan`).
///
/// Invariant: not blank. The text itself is sent unchanged.
pub struct MessageText(String);

impl MessageText {
    /// Query parameter name used by Zenziva (`pesan`).
    pub const FIELD: &'static str = "pesan";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Zenziva status code (`message.status`).
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct StatusCode(i32);

impl StatusCode {
    /// Construct a status code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by Zenziva.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known status code variant, if one exists.
    pub fn known(self) -> Option<KnownStatusCode> {
        KnownStatusCode::from_code(self.0)
    }

    /// `0` is the only code Zenziva uses for an accepted message.
    pub fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Human-readable description from the status table, for known codes.
    pub fn description(self) -> Option<&'static str> {
        self.known().map(KnownStatusCode::description)
    }

    /// Returns `true` if the gateway rejected the account credentials.
    pub fn is_auth_error(self) -> bool {
        self.known() == Some(KnownStatusCode::InvalidCredentials)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known Zenziva status codes.
///
/// Unknown codes are preserved as [`StatusCode`] and return `None` from [`KnownStatusCode::from_code`].
pub enum KnownStatusCode {
    Success,
    InvalidDestination,
    InvalidCredentials,
    ContentRejected,
    RepeatedSendToNumber,
    InsufficientCredit,
}

/// The Zenziva status table: code and the gateway's own description.
pub const STATUS_CODES: [(i32, &str); 6] = [
    (0, "Success"),
    (1, "Nomor tujuan tidak valid"),
    (5, "Userkey / Passkey salah"),
    (6, "Konten SMS rejected"),
    (
        89,
        "Pengiriman SMS berulang-ulang ke satu nomor dalam satu waktu",
    ),
    (99, "Credit tidak mencukupi"),
];

impl KnownStatusCode {
    /// Convert a raw Zenziva integer code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Success,
            1 => Self::InvalidDestination,
            5 => Self::InvalidCredentials,
            6 => Self::ContentRejected,
            89 => Self::RepeatedSendToNumber,
            99 => Self::InsufficientCredit,
            _ => return None,
        })
    }

    /// Integer code as used on the wire.
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InvalidDestination => 1,
            Self::InvalidCredentials => 5,
            Self::ContentRejected => 6,
            Self::RepeatedSendToNumber => 89,
            Self::InsufficientCredit => 99,
        }
    }

    /// Description as published by Zenziva (Indonesian).
    pub fn description(self) -> &'static str {
        let code = self.code();
        STATUS_CODES
            .iter()
            .find(|(known, _)| *known == code)
            .map_or("", |(_, text)| *text)
    }
}

impl From<KnownStatusCode> for StatusCode {
    fn from(value: KnownStatusCode) -> Self {
        Self(value.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msisdn_rewrites_international_prefix() {
        let msisdn = Msisdn::normalize("62811234567").unwrap();
        assert_eq!(msisdn.as_str(), "0811234567");
    }

    #[test]
    fn msisdn_rewrites_plus_prefix_like_bare_prefix() {
        let plus = Msisdn::normalize("+62811234567").unwrap();
        let bare = Msisdn::normalize("62811234567").unwrap();
        assert_eq!(plus, bare);
        assert_eq!(plus.as_str(), "0811234567");
    }

    #[test]
    fn msisdn_keeps_local_form_and_trims() {
        assert_eq!(
            Msisdn::normalize("0811234567").unwrap().as_str(),
            "0811234567"
        );
        assert_eq!(
            Msisdn::normalize("  081234567890 ").unwrap().as_str(),
            "081234567890"
        );
    }

    #[test]
    fn msisdn_ignores_surrounding_whitespace() {
        for input in [" 0811234567", "0811234567\n", "\t+62811234567 ", " 62811234567\r\n"] {
            assert_eq!(
                Msisdn::normalize(input).unwrap().as_str(),
                "0811234567",
                "{input:?} should be accepted"
            );
        }
        assert_eq!(
            Msisdn::normalize(" 0811 234567 "),
            Err(ValidationError::InvalidMsisdn {
                input: " 0811 234567 ".to_owned()
            })
        );
    }

    #[test]
    fn msisdn_accepts_shortest_and_longest_shapes() {
        // 2-digit area + 6-digit subscriber
        assert!(Msisdn::normalize("021123456").is_ok());
        // 3-digit area + 8-digit subscriber
        assert!(Msisdn::normalize("081212345678").is_ok());
        assert!(Msisdn::normalize("6281212345678").is_ok());
    }

    #[test]
    fn msisdn_rejects_everything_else() {
        for input in [
            "",
            "12345",
            "02112345",
            "0812123456789",
            "0011234567",
            "62011234567",
            "+6201123456",
            "+63811234567",
            "0811-234-567",
            "08a1234567",
        ] {
            assert_eq!(
                Msisdn::normalize(input),
                Err(ValidationError::InvalidMsisdn {
                    input: input.to_owned()
                }),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn msisdn_international_view() {
        let msisdn = Msisdn::normalize("0811234567").unwrap();
        assert_eq!(msisdn.international(), "62811234567");
        assert_eq!(msisdn.to_string(), "0811234567");
    }

    #[test]
    fn otp_code_length_boundaries() {
        assert!(OtpCode::new("1234").is_ok());
        assert!(OtpCode::new("12345678").is_ok());
        assert_eq!(
            OtpCode::new("123"),
            Err(ValidationError::OtpCodeLength {
                min: 4,
                max: 8,
                actual: 3
            })
        );
        assert!(OtpCode::new("123456789").is_err());
    }

    #[test]
    fn otp_code_is_trimmed_before_length_check() {
        let code = OtpCode::new("  1234 ").unwrap();
        assert_eq!(code.as_str(), "1234");
        assert!(OtpCode::new(" 123 ").is_err());
    }

    #[test]
    fn otp_code_length_is_measured_in_bytes() {
        // "é" is two bytes in UTF-8.
        assert!(OtpCode::new("éé").is_ok());
        assert!(OtpCode::new("éééé").is_ok());
        assert_eq!(
            OtpCode::new("é1"),
            Err(ValidationError::OtpCodeLength {
                min: 4,
                max: 8,
                actual: 3
            })
        );
        assert_eq!(
            OtpCode::new("ééééé"),
            Err(ValidationError::OtpCodeLength {
                min: 4,
                max: 8,
                actual: 10
            })
        );
    }

    #[test]
    fn otp_code_keeps_non_ascii_whitespace() {
        let code = OtpCode::new("\u{a0}1234\u{a0}").unwrap();
        assert_eq!(code.as_str(), "\u{a0}1234\u{a0}");
        assert_eq!(code.as_str().len(), 8);
    }

    #[test]
    fn message_text_is_passed_through() {
        let text = MessageText::new(" halo ").unwrap();
        assert_eq!(text.as_str(), " halo ");
    }

    #[test]
    fn message_text_rejects_blank_input() {
        for input in ["", "   ", "\n\t"] {
            assert_eq!(
                MessageText::new(input),
                Err(ValidationError::Empty { field: "pesan" }),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn status_code_table_lookup() {
        assert_eq!(
            StatusCode::new(1).description(),
            Some("Nomor tujuan tidak valid")
        );
        assert_eq!(
            StatusCode::new(99).known(),
            Some(KnownStatusCode::InsufficientCredit)
        );
        assert!(StatusCode::new(0).is_success());
        assert!(StatusCode::new(5).is_auth_error());

        let unknown = StatusCode::new(42);
        assert!(unknown.known().is_none());
        assert!(unknown.description().is_none());
        assert!(!unknown.is_success());
    }

    #[test]
    fn known_status_codes_round_trip_through_table() {
        for (code, text) in STATUS_CODES {
            let known = KnownStatusCode::from_code(code).unwrap();
            assert_eq!(known.code(), code);
            assert_eq!(known.description(), text);
            assert_eq!(StatusCode::from(known).as_i32(), code);
        }
    }
}
