//! Page chrome: the collapsible navigation menu and the contact form.

/// Hamburger toggle plus the navigation panel it opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    toggle_active: bool,
    panel_active: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the active state on both the toggle and the panel.
    pub fn toggle(&mut self) {
        self.toggle_active = !self.toggle_active;
        self.panel_active = !self.panel_active;
    }

    /// Any navigation link closes the menu.
    pub fn link_clicked(&mut self) {
        self.toggle_active = false;
        self.panel_active = false;
    }

    pub fn is_open(&self) -> bool {
        self.toggle_active && self.panel_active
    }

    pub fn toggle_active(&self) -> bool {
        self.toggle_active
    }

    pub fn panel_active(&self) -> bool {
        self.panel_active
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub fields: ContactFields,
    acknowledgement_visible: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the acknowledgement and reset the fields.
    ///
    /// Hiding it again is scheduled by the caller; nothing is sent anywhere.
    pub fn submit(&mut self) {
        self.acknowledgement_visible = true;
        self.fields = ContactFields::default();
    }

    /// No-op when already hidden.
    pub fn hide_acknowledgement(&mut self) {
        self.acknowledgement_visible = false;
    }

    pub fn acknowledgement_visible(&self) -> bool {
        self.acknowledgement_visible
    }
}
