#[derive(Debug)]
pub struct Request {
    pub(crate) url: String,
    pub(crate) params: Vec<(String, String)>,
}

pub struct RequestBuilder {
    request: Request,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    pub fn default() -> Self {
        Request {
            url: Default::default(),
            params: Vec::new(),
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            request: Request::default(),
        }
    }

    pub fn set_url(mut self, url: impl Into<String>) -> Self {
        self.request.url = url.into();

        self
    }

    pub fn set_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.params.push((key.into(), value.into()));

        self
    }

    pub fn build(self) -> Request {
        self.request
    }
}
