use crate::HttpRequest;

pub fn get(url: impl Into<String>) -> HttpRequest {
    HttpRequest {
        method: "GET".to_string(),
        url: url.into(),
        headers: Vec::new(),
        body: Vec::new(),
    }
}

pub fn post(url: impl Into<String>, body: impl Into<Vec<u8>>) -> HttpRequest {
    HttpRequest {
        method: "POST".to_string(),
        url: url.into(),
        headers: Vec::new(),
        body: body.into(),
    }
}
