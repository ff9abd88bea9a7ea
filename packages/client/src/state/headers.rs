//! Header and cookie mutators
//!
//! A `None` value removes the key; `Some` sets or overwrites it. Bulk
//! variants apply entries in iteration order, so later duplicates win.

use super::core::RequestState;

impl RequestState {
    /// Set or remove a header
    pub fn add_header(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) => {
                self.headers.insert(key.to_string(), value.to_string());
            }
            None => {
                self.headers.shift_remove(key);
            }
        }
        self
    }

    /// Set or remove several headers
    pub fn add_headers<'a, I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        for (key, value) in entries {
            self.add_header(key, value);
        }
        self
    }

    /// Set or remove a cookie
    pub fn add_cookie(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) => {
                self.cookies.insert(key.to_string(), value.to_string());
            }
            None => {
                self.cookies.shift_remove(key);
            }
        }
        self
    }

    /// Set or remove several cookies
    pub fn add_cookies<'a, I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        for (key, value) in entries {
            self.add_cookie(key, value);
        }
        self
    }

    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn cookie(&self, key: &str) -> Option<&str> {
        self.cookies.get(key).map(String::as_str)
    }

    /// Headers in insertion order
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Cookies in insertion order
    pub fn cookies(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
