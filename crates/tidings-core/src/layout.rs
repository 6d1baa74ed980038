//! Dialog size metrics

/// Spacing and row sizes of the preference dialogs, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxMetrics {
    pub width: i32,
    pub option_list_padding_top: i32,
    pub option_list_padding_bottom: i32,
    pub option_list_skip: i32,
    pub option_input_skip: i32,
    pub box_padding_bottom: i32,
    pub ipv6_skip: i32,
    pub checkbox_height: i32,
    pub input_height: i32,
    pub title_height: i32,
    pub little_skip: i32,
    pub auto_download_top_delta: i32,
}

impl Default for BoxMetrics {
    fn default() -> Self {
        Self {
            width: 420,
            option_list_padding_top: 16,
            option_list_padding_bottom: 12,
            option_list_skip: 10,
            option_input_skip: 8,
            box_padding_bottom: 12,
            ipv6_skip: 18,
            checkbox_height: 40,
            input_height: 58,
            title_height: 48,
            little_skip: 6,
            auto_download_top_delta: 10,
        }
    }
}

impl BoxMetrics {
    /// Content height of the connection dialog
    pub fn connection_height(&self, proxy_fields_visible: bool) -> i32 {
        let mut height = self.option_list_padding_top
            + 3 * (self.checkbox_height + self.option_list_skip)
            + self.ipv6_skip
            + self.checkbox_height
            + self.option_list_padding_bottom
            + self.box_padding_bottom;
        if proxy_fields_visible {
            height += 2 * self.option_input_skip + 2 * self.input_height;
        }
        height
    }

    /// Height of one titled media section with its two switches
    pub fn section_height(&self) -> i32 {
        self.title_height + 2 * (self.checkbox_height + self.little_skip)
    }

    /// Content height of the auto-download dialog
    pub fn auto_download_height(&self) -> i32 {
        3 * self.section_height() - self.auto_download_top_delta
            + self.little_skip
            + self.checkbox_height
            + self.little_skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_fields_add_two_input_rows() {
        let metrics = BoxMetrics::default();
        let delta = metrics.connection_height(true) - metrics.connection_height(false);
        assert_eq!(delta, 2 * (metrics.option_input_skip + metrics.input_height));
    }

    #[test]
    fn test_auto_download_height() {
        let metrics = BoxMetrics::default();
        // 3 * (48 + 2 * 46) - 10 + 6 + 40 + 6
        assert_eq!(metrics.auto_download_height(), 462);
    }
}
