use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, Msisdn, OtpCode};

/// Endpoint path for plain SMS, relative to the API host root.
pub const SEND_SMS_PATH: &str = "apps/smsapi.php";
/// Endpoint path for OTP SMS, relative to the API host root.
pub const SEND_OTP_PATH: &str = "apps/smsotp.php";

/// Validated plain SMS request (`smsapi.php`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSms {
    msisdn: Msisdn,
    text: MessageText,
}

impl SendSms {
    /// Normalize the destination number and validate the message text.
    pub fn new(msisdn: impl AsRef<str>, text: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            msisdn: Msisdn::normalize(msisdn)?,
            text: MessageText::new(text)?,
        })
    }

    pub fn msisdn(&self) -> &Msisdn {
        &self.msisdn
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }
}

/// Validated OTP request (`smsotp.php`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOtp {
    msisdn: Msisdn,
    code: OtpCode,
}

impl SendOtp {
    /// Normalize the destination number and validate the code length.
    pub fn new(msisdn: impl AsRef<str>, code: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self {
            msisdn: Msisdn::normalize(msisdn)?,
            code: OtpCode::new(code)?,
        })
    }

    pub fn msisdn(&self) -> &Msisdn {
        &self.msisdn
    }

    pub fn code(&self) -> &OtpCode {
        &self.code
    }
}
