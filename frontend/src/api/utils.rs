use gloo_net::http::{Request, RequestBuilder};

/// Marks a request as an in-page (ajax) call expecting JSON.
///
/// The admin host authenticates with its session cookie, which the browser
/// attaches to same-origin requests on its own.
fn ajax(req: RequestBuilder) -> RequestBuilder {
    req.header("X-Requested-With", "XMLHttpRequest")
        .header("Accept", "application/json")
}

/// Creates a GET request for an admin endpoint
pub fn admin_get(url: &str) -> RequestBuilder {
    ajax(Request::get(url))
}

/// Creates a form POST request for an admin endpoint
pub fn admin_form_post(url: &str) -> RequestBuilder {
    ajax(Request::post(url)).header(
        "Content-Type",
        "application/x-www-form-urlencoded; charset=UTF-8",
    )
}
