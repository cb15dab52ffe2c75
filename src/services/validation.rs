/// Strip everything but ASCII digits and cut to `max_len`, mirroring how the
/// payment form fields restrict input.
pub fn normalize_digits(input: &str, max_len: usize) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(max_len)
        .collect()
}

/// Mobile wallet numbers are 11 digits.
pub fn is_valid_bkash_number(number: &str) -> bool {
    let re = regex::Regex::new(r"^\d{11}$");
    return re.unwrap().is_match(number);
}

/// One-time passwords are 6 digits.
pub fn is_valid_otp(code: &str) -> bool {
    let re = regex::Regex::new(r"^\d{6}$");
    return re.unwrap().is_match(code);
}
