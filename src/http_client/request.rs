use std::{
    collections::HashMap,
    fmt::{self, Display},
    ops::{Deref, DerefMut},
};

use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct Request {
    pub method: RequestMethod,
    pub url: String,
    pub headers: RequestHeaders,
    pub body: Bytes,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: RequestMethod::Get,
            url: url.into(),
            headers: RequestHeaders::default(),
            body: Bytes::new(),
        }
    }
}

/// Header names are stored lowercase when converted from a `HeaderMap`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestHeaders(pub HashMap<String, String>);

impl Deref for RequestHeaders {
    type Target = HashMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RequestHeaders {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[(String, String); N]> for RequestHeaders {
    fn from(arr: [(String, String); N]) -> Self {
        let map = arr.into_iter().collect();
        RequestHeaders(map)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
        };
        write!(f, "{}", s)
    }
}
