//! Well-known property names read by the page facade and link builder.

/// Page title
pub const TITLE: &str = "jcr:title";

/// Page title override used for `<title>` style output
pub const PAGE_TITLE: &str = "pageTitle";

/// Navigation title override
pub const NAVIGATION_TITLE: &str = "navTitle";

pub const DESCRIPTION: &str = "jcr:description";

/// Boolean flag excluding a page from navigation
pub const HIDE_IN_NAV: &str = "hideInNav";

/// Path of the template a page was created from
pub const TEMPLATE: &str = "cq:template";

pub const LAST_MODIFIED: &str = "cq:lastModified";

/// Start of the page validity window
pub const ON_TIME: &str = "onTime";

/// End of the page validity window
pub const OFF_TIME: &str = "offTime";

pub const VANITY_PATH: &str = "sling:vanityPath";

/// Page redirect target
pub const REDIRECT_TARGET: &str = "redirectTarget";

/// Image reference property, read on an image child node
pub const FILE_REFERENCE: &str = "fileReference";

/// Default image child node name
pub const DEFAULT_IMAGE_NAME: &str = "image";
