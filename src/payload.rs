use clap::ValueEnum;

/// Payload used whenever the user has not typed a link yet.
pub const PLACEHOLDER_URL: &str = "https://example.com";

/// Which kind of content the QR code carries. Exactly one is active per
/// invocation. The hosted-file kinds do not go through `encode`; their
/// payload comes from the upload adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Link,
    Text,
    Email,
    Pdf,
    Img,
    Wifi,
    Whatsapp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WifiSecurity {
    #[default]
    Wpa,
    Wep,
    Nopass,
}

impl WifiSecurity {
    /// The token that goes into the T: segment of the WIFI: format.
    pub fn token(self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::Nopass => "nopass",
        }
    }
}

/// The raw input field values, one bag for all content kinds. The CLI
/// fills in the fields for the active kind and leaves the rest at their
/// defaults; `encode` only reads the ones the kind calls for.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    pub url: String,
    pub text: String,
    pub email_to: String,
    pub email_subject: String,
    pub email_body: String,
    pub wifi_ssid: String,
    pub wifi_password: String,
    pub wifi_security: WifiSecurity,
    pub wa_number: String,
    pub wa_message: String,
}

/// Turn field values into the string the QR symbol will carry. Pure and
/// total: blank input falls back to a default, never an error.
///
/// SSID and password are deliberately not escaped for the `;`/`,`/`\`
/// characters the WIFI: convention reserves; scanners accept the plain
/// form for ordinary network names.
pub fn encode(kind: ContentKind, fields: &Fields) -> String {
    match kind {
        ContentKind::Link => {
            if fields.url.is_empty() {
                PLACEHOLDER_URL.to_string()
            } else {
                fields.url.clone()
            }
        }
        ContentKind::Text => {
            if fields.text.is_empty() {
                "Text".to_string()
            } else {
                fields.text.clone()
            }
        }
        ContentKind::Email => format!(
            "mailto:{}?subject={}&body={}",
            fields.email_to,
            urlencoding::encode(&fields.email_subject),
            urlencoding::encode(&fields.email_body),
        ),
        ContentKind::Wifi => match fields.wifi_security {
            WifiSecurity::Nopass => format!("WIFI:T:nopass;S:{};;", fields.wifi_ssid),
            security => format!(
                "WIFI:T:{};S:{};P:{};;",
                security.token(),
                fields.wifi_ssid,
                fields.wifi_password,
            ),
        },
        ContentKind::Whatsapp => format!(
            "https://wa.me/{}?text={}",
            fields.wa_number,
            urlencoding::encode(&fields.wa_message),
        ),
        // Hosted-file kinds resolve to the uploaded file's link instead.
        ContentKind::Pdf | ContentKind::Img => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_defaults_to_placeholder() {
        let fields = Fields::default();
        assert_eq!(encode(ContentKind::Link, &fields), "https://example.com");
    }

    #[test]
    fn test_link_passes_url_through() {
        let fields = Fields {
            url: "https://ferrous.dev/a?b=c".to_string(),
            ..Fields::default()
        };
        assert_eq!(
            encode(ContentKind::Link, &fields),
            "https://ferrous.dev/a?b=c"
        );
    }

    #[test]
    fn test_text_defaults() {
        let fields = Fields::default();
        assert_eq!(encode(ContentKind::Text, &fields), "Text");
    }

    #[test]
    fn test_email_format() {
        let fields = Fields {
            email_to: "a@b.com".to_string(),
            email_subject: "Hi".to_string(),
            email_body: "Yo".to_string(),
            ..Fields::default()
        };
        assert_eq!(
            encode(ContentKind::Email, &fields),
            "mailto:a@b.com?subject=Hi&body=Yo"
        );
    }

    #[test]
    fn test_email_encodes_reserved_characters() {
        let fields = Fields {
            email_to: "a@b.com".to_string(),
            email_subject: "Hello there".to_string(),
            email_body: "1 + 1 = 2 & more".to_string(),
            ..Fields::default()
        };
        assert_eq!(
            encode(ContentKind::Email, &fields),
            "mailto:a@b.com?subject=Hello%20there&body=1%20%2B%201%20%3D%202%20%26%20more"
        );
    }

    #[test]
    fn test_email_never_blocks_on_missing_address() {
        let fields = Fields::default();
        assert_eq!(encode(ContentKind::Email, &fields), "mailto:?subject=&body=");
    }

    #[test]
    fn test_wifi_nopass_omits_password_segment() {
        let fields = Fields {
            wifi_ssid: "S".to_string(),
            wifi_security: WifiSecurity::Nopass,
            ..Fields::default()
        };
        assert_eq!(encode(ContentKind::Wifi, &fields), "WIFI:T:nopass;S:S;;");
    }

    #[test]
    fn test_wifi_wpa() {
        let fields = Fields {
            wifi_ssid: "S".to_string(),
            wifi_password: "P".to_string(),
            wifi_security: WifiSecurity::Wpa,
            ..Fields::default()
        };
        assert_eq!(encode(ContentKind::Wifi, &fields), "WIFI:T:WPA;S:S;P:P;;");
    }

    #[test]
    fn test_wifi_leaves_reserved_characters_alone() {
        let fields = Fields {
            wifi_ssid: "my;net".to_string(),
            wifi_password: "a,b\\c".to_string(),
            wifi_security: WifiSecurity::Wep,
            ..Fields::default()
        };
        assert_eq!(
            encode(ContentKind::Wifi, &fields),
            "WIFI:T:WEP;S:my;net;P:a,b\\c;;"
        );
    }

    #[test]
    fn test_whatsapp_format() {
        let fields = Fields {
            wa_number: "15551234567".to_string(),
            wa_message: "hi there".to_string(),
            ..Fields::default()
        };
        assert_eq!(
            encode(ContentKind::Whatsapp, &fields),
            "https://wa.me/15551234567?text=hi%20there"
        );
    }

    #[test]
    fn test_hosted_file_kinds_produce_nothing() {
        let fields = Fields::default();
        assert_eq!(encode(ContentKind::Pdf, &fields), "");
        assert_eq!(encode(ContentKind::Img, &fields), "");
    }
}
