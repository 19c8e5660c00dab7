use quick_xml::escape::escape;

pub const REQUEST_SCHEMA: &str =
    "http://schemas.microsoft.com/exchange/autodiscover/outlook/requestschema/2006";
pub const RESPONSE_SCHEMA: &str =
    "http://schemas.microsoft.com/exchange/autodiscover/outlook/responseschema/2006a";
pub const CONTENT_TYPE: &str = "text/xml";

/// Builds the Outlook autodiscover request document for `email`.
pub fn request_body(email: &str) -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
            "<Autodiscover xmlns=\"{request}\">\n",
            "  <Request>\n",
            "    <EMailAddress>{email}</EMailAddress>\n",
            "    <AcceptableResponseSchema>{response}</AcceptableResponseSchema>\n",
            "  </Request>\n",
            "</Autodiscover>\n",
        ),
        request = REQUEST_SCHEMA,
        email = escape(email),
        response = RESPONSE_SCHEMA,
    )
}
