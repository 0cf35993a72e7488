//! Built-in fingerprint table
//!
//! Body signatures of third-party services answering for a host nobody has
//! claimed. Order is significant: the first eligible match wins.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use sdto_common::{Fingerprint, SdtoResult};

use crate::loader::{load_definitions, FingerprintDefinition};

/// `(name, pattern)` pairs; none of the defaults opt into `200 OK`.
pub const DEFAULT_DEFINITIONS: &[(&str, &str)] = &[
    ("AWS/S3", r"The specified bucket does not exist"),
    ("BitBucket", r"Repository not found"),
    ("Github", r"There isn't a Github Pages site here\."),
    ("Shopify", r"Sorry, this shop is currently unavailable\."),
    ("Fastly", r"Fastly pattern: unknown domain:"),
    ("Ghost", r"The thing you were looking for is no longer here, or never was"),
    (
        "Heroku",
        r"no-such-app.html|<title>no such app</title>|herokucdn.com/pattern-pages/no-such-app.html",
    ),
    (
        "Pantheon",
        r"The gods are wise, but do not know of the site which you seek.",
    ),
    (
        "Tumbler",
        r"Whatever you were looking for doesn't currently exist at this address.",
    ),
    ("Wordpress", r"Do you want to register"),
    ("TeamWork", r"Oops - We didn't find your site."),
    ("Helpjuice", r"We could not find what you're looking for."),
    ("Helpscout", r"No settings were found for this company:"),
    ("Cargo", r"<title>404 &mdash; File not found</title>"),
    ("Uservoice", r"This UserVoice subdomain is currently available!"),
    ("Surge", r"project not found"),
    (
        "Intercom",
        r"This page is reserved for artistic dogs\.|Uh oh\. That page doesn't exist</h1>",
    ),
    (
        "Webflow",
        r#"<p class="description">The page you are looking for doesn't exist or has been moved.</p>"#,
    ),
    ("Kajabi", r"<h1>The page you were looking for doesn't exist.</h1>"),
    (
        "Thinkific",
        r"You may have mistyped the address or the page may have moved.",
    ),
    ("Tave", r"<h1>pattern 404: Page Not Found</h1>"),
    ("Wishpond", r"<h1>https://www.wishpond.com/404?campaign=true"),
    (
        "Aftership",
        r#"Oops.</h2><p class="text-muted text-tight">The page you're looking for doesn't exist."#,
    ),
    ("Aha", r"There is no portal here \.\.\. sending you back to Aha!"),
    (
        "Tictail",
        r#"to target URL: <a href="https://tictail.com|Start selling on Tictail."#,
    ),
    (
        "Brightcove",
        r#"<p class="bc-gallery-pattern-code">pattern Code: 404</p>"#,
    ),
    ("Bigcartel", r"<h1>Oops! We couldn&#8217;t find that page.</h1>"),
    ("ActiveCampaign", r#"alt="LIGHTTPD - fly light.""#),
    (
        "Campaignmonitor",
        r#"Double check the URL or <a href="mailto:help@createsend.com"#,
    ),
    (
        "Acquia",
        r"The site you are looking for could not be found.|If you are an Acquia Cloud customer and expect to see your site at this address",
    ),
    (
        "Proposify",
        r#"If you need immediate assistance, please contact <a href="mailto:support@proposify.biz"#,
    ),
    (
        "Simplebooklet",
        r#"We can't find this <a href="https://simplebooklet.com"#,
    ),
    (
        "GetResponse",
        r"With GetResponse Landing Pages, lead generation has never been easier",
    ),
    ("Vend", r"Looks like you've traveled too far into cyberspace."),
    ("Jetbrains", r"is not a registered InCloud YouTrack."),
    ("Smartling", r"Domain is not configured"),
    ("Pingdom", r"pingdom"),
    ("Tilda", r"Domain has been assigned"),
    ("Surveygizmo", r"data-html-name"),
    ("Mashery", r"Unrecognized domain <strong>"),
    ("Divio", r"Application not responding"),
    ("feedpress", r"The feed has not been found."),
    ("readme", r"Project doesnt exist... yet!"),
    ("statuspage", r"You are being <a href='https>"),
    ("zendesk", r"Help Center Closed"),
    ("worksites.net", r"Hello! Sorry, but the webs>"),
    (
        "wix",
        r"Looks Like This Domain Isn't Connected To A Website Yet!",
    ),
];

static DEFAULT_FINGERPRINTS: OnceCell<Arc<[Fingerprint]>> = OnceCell::new();

/// The built-in set, compiled on first use and shared read-only afterwards.
pub fn default_fingerprints() -> SdtoResult<Arc<[Fingerprint]>> {
    DEFAULT_FINGERPRINTS
        .get_or_try_init(|| {
            let definitions = DEFAULT_DEFINITIONS.iter().map(|(name, pattern)| {
                (
                    (*name).to_string(),
                    FingerprintDefinition::new(*pattern),
                )
            });
            load_definitions(definitions).map(Arc::from)
        })
        .map(Arc::clone)
}
