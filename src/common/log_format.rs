use crate::common::bit::Mask;

/// # Examples
/// ```
/// use bitmask_fields::common::log_format::LogFormat;
///
/// let fn_message = LogFormat::call("Bitmask", "set", &["'spam'".to_string()]);
/// assert_eq!(fn_message, "Bitmask::set('spam')");
/// ```
pub struct LogFormat;

impl LogFormat {

    pub fn call(class: &str, fn_name: &str, args: &[String]) -> String {
        let args_str = args.join(", ");
        format!("{}::{}({})", class, fn_name, args_str)
    }

    /// Format string argument for log output
    ///
    /// # Examples
    /// ```
    /// use bitmask_fields::common::log_format::LogFormat;
    ///
    /// assert_eq!(LogFormat::format_str_arg("spam"), "'spam'");
    /// ```
    pub fn format_str_arg(s: &str) -> String {
        if s.chars().count() > 50 {
            let head: String = s.chars().take(47).collect();
            format!("'{}'...", head)
        } else {
            format!("'{}'", s)
        }
    }

    /// Format a mask as binary, grouped the way masks are usually declared
    ///
    /// # Examples
    /// ```
    /// use bitmask_fields::common::log_format::LogFormat;
    ///
    /// assert_eq!(LogFormat::format_mask(0b101), "0b101");
    /// assert_eq!(LogFormat::format_mask(0), "0b0");
    /// ```
    pub fn format_mask(mask: Mask) -> String {
        format!("{:#b}", mask)
    }
}

/// Log macro: fn call
///
/// # Examples
/// ```ignore
/// use crate::fn_log;
///
/// fn_log!("Bitmask", "set", "spam");
/// // Logs: Bitmask::set('spam')
/// ```
#[macro_export]
macro_rules! fn_log {
    ($class:expr, $fun:expr $(, $arg:expr)*) => {{
        #[cfg(feature = "logging")]
        {
            let args: Vec<String> = vec![
                $(
                    $crate::common::log_format::LogFormat::format_str_arg($arg),
                )*
            ];
            log::debug!("{}", $crate::common::log_format::LogFormat::call($class, $fun, &args));
        }
    }};
}

/// Log macro: warning attached to a call site
///
/// # Examples
/// ```ignore
/// use crate::warn_log;
///
/// warn_log!("FieldsValidator", "validate", "changed bits 0b100 outside 0b11");
/// // Logs: FieldsValidator::validate: changed bits 0b100 outside 0b11
/// ```
#[macro_export]
macro_rules! warn_log {
    ($class:expr, $fun:expr, $msg:expr) => {{
        #[cfg(feature = "logging")]
        {
            log::warn!("{}::{}: {}", $class, $fun, $msg);
        }
        #[cfg(not(feature = "logging"))]
        {
            let _ = || ($class, $fun, $msg);
        }
    }};
}
