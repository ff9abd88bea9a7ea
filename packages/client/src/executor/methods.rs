//! Convenience verbs
//!
//! Each verb is a fixed dispatch into [`RequestExecutor::execute`]: data
//! travels in the URL for GET and in the body for every other verb, using the
//! executor's configured JSON default.

use http::Method;

use super::core::RequestExecutor;
use super::payload::RequestData;
use super::response::Response;
use crate::error::Result;

impl RequestExecutor {
    /// Execute a GET request; `data` is appended as a query string
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::execute`].
    pub fn get(&mut self, data: impl Into<RequestData>) -> Result<&Response> {
        self.send(Method::GET, data)
    }

    /// Execute a POST request with `data` as the body
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::execute`].
    pub fn post(&mut self, data: impl Into<RequestData>) -> Result<&Response> {
        self.send(Method::POST, data)
    }

    /// Execute a PUT request with `data` as the body
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::execute`].
    pub fn put(&mut self, data: impl Into<RequestData>) -> Result<&Response> {
        self.send(Method::PUT, data)
    }

    /// Execute a PATCH request with `data` as the body
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::execute`].
    pub fn patch(&mut self, data: impl Into<RequestData>) -> Result<&Response> {
        self.send(Method::PATCH, data)
    }

    /// Execute a DELETE request with `data` as the body
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::execute`].
    pub fn delete(&mut self, data: impl Into<RequestData>) -> Result<&Response> {
        self.send(Method::DELETE, data)
    }

    /// Execute `verb` with the verb's default data placement
    ///
    /// # Errors
    ///
    /// See [`RequestExecutor::execute`].
    pub fn send(&mut self, verb: Method, data: impl Into<RequestData>) -> Result<&Response> {
        let payload = verb != Method::GET;
        let encode_as_json = self.config.encode_as_json;
        self.execute(verb, data, payload, encode_as_json)
    }
}
