use strum::{FromRepr, IntoStaticStr};

#[derive(FromRepr, IntoStaticStr, Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[repr(u16)]
pub enum Status {
    // Informational
    Continue = 100,
    #[strum(serialize = "Switching Protocols")]
    SwitchingProtocols = 101,
    Processing = 102,
    #[strum(serialize = "Early Hints")]
    EarlyHints = 103,

    // Success
    #[strum(serialize = "OK")]
    Ok = 200,
    Created = 201,
    Accepted = 202,
    #[strum(serialize = "Non-Authoritative Information")]
    NonAuthoritativeInformation = 203,
    #[strum(serialize = "No Content")]
    NoContent = 204,
    #[strum(serialize = "Reset Content")]
    ResetContent = 205,
    #[strum(serialize = "Partial Content")]
    PartialContent = 206,
    Multi = 207,
    #[strum(serialize = "Already Reported")]
    AlreadyReported = 208,
    #[strum(serialize = "IM Used")]
    ImUsed = 226,

    // Redirection
    #[strum(serialize = "Multiple Choices")]
    MultipleChoices = 300,
    #[strum(serialize = "Moved Permanently")]
    MovedPermanently = 301,
    Found = 302,
    #[strum(serialize = "See Other")]
    SeeOther = 303,
    #[strum(serialize = "Not Modified")]
    NotModified = 304,
    #[strum(serialize = "Use Proxy")]
    UseProxy = 305,
    #[strum(serialize = "Switch Proxy")]
    SwitchProxy = 306,
    #[strum(serialize = "Temporary Redirect")]
    TemporaryRedirect = 307,
    #[strum(serialize = "Permanent Redirect")]
    PermanentRedirect = 308,

    // Client errors
    #[strum(serialize = "Bad Request")]
    BadRequest = 400,
    Unauthorized = 401,
    #[strum(serialize = "Payment Required")]
    PaymentRequired = 402,
    Forbidden = 403,
    #[strum(serialize = "Not Found")]
    NotFound = 404,
    #[strum(serialize = "Method Not Allowed")]
    MethodNotAllowed = 405,
    #[strum(serialize = "Not Acceptable")]
    NotAcceptable = 406,
    #[strum(serialize = "Proxy Authentication Required")]
    ProxyAuthenticationRequired = 407,
    #[strum(serialize = "Request Timeout")]
    RequestTimeout = 408,
    Conflict = 409,
    Gone = 410,
    #[strum(serialize = "Length Required")]
    LengthRequired = 411,
    #[strum(serialize = "Precondition Failed")]
    PreconditionFailed = 412,
    #[strum(serialize = "Payload Too Large")]
    PayloadTooLarge = 413,
    #[strum(serialize = "URI Too Long")]
    UriTooLong = 414,
    #[strum(serialize = "Unsupported Media Type")]
    UnsupportedMediaType = 415,
    #[strum(serialize = "Range Not Satisfiable")]
    RangeNotSatisfiable = 416,
    #[strum(serialize = "Expectation Failed")]
    ExpectationFailed = 417,
    #[strum(serialize = "I'm A Teapot")]
    ImATeapot = 418,
    #[strum(serialize = "Misdirected Request")]
    MisdirectedRequest = 421,
    #[strum(serialize = "Unprocessable Entity")]
    UnprocessableEntity = 422,
    Locked = 423,
    #[strum(serialize = "Failed Dependency")]
    FailedDependency = 424,
    #[strum(serialize = "Too Early")]
    TooEarly = 425,
    #[strum(serialize = "Upgrade Required")]
    UpgradeRequired = 426,
    #[strum(serialize = "Precondition Required")]
    PreconditionRequired = 428,
    #[strum(serialize = "Too Many Requests")]
    TooManyRequests = 429,
    #[strum(serialize = "Request Header Fields Too Large")]
    RequestHeaderFieldsTooLarge = 431,
    #[strum(serialize = "Unavailable For Legal Reasons")]
    UnavailableForLegalReasons = 451,

    // Server errors
    #[strum(serialize = "Internal Server Error")]
    InternalServerError = 500,
    #[strum(serialize = "Not Implemented")]
    NotImplemented = 501,
    #[strum(serialize = "Bad Gateway")]
    BadGateway = 502,
    #[strum(serialize = "Service Unavailable")]
    ServiceUnavailable = 503,
    #[strum(serialize = "Gateway Timeout")]
    GatewayTimeout = 504,
    #[strum(serialize = "HTTP Version Not Supported")]
    HttpVersionNotSupported = 505,
    #[strum(serialize = "Variant Also Negotiates")]
    VariantAlsoNegotiates = 506,
    #[strum(serialize = "Insufficient Storage")]
    InsufficientStorage = 507,
    #[strum(serialize = "Loop Detected")]
    LoopDetected = 508,
    #[strum(serialize = "Not Extended")]
    NotExtended = 510,
    #[strum(serialize = "Network Authentication Required")]
    NetworkAuthenticationRequired = 511,
}

impl Status {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn reason(self) -> &'static str {
        self.into()
    }
}

impl From<Status> for u16 {
    fn from(status: Status) -> u16 {
        status.code()
    }
}

/// Canonical reason phrase for `code`, or `""` if the code is not in the table.
pub fn reason_phrase(code: u16) -> &'static str {
    Status::from_repr(code).map(Status::reason).unwrap_or("")
}
