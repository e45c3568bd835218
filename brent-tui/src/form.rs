//! Date-range filter form — two text fields plus Apply/Clear actions.
//!
//! The form owns only its transient input. It never filters anything itself:
//! submit and clear produce a `FilterRequest` that the app applies.

/// Focusable items, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Start,
    End,
    Apply,
    Clear,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Start => FormField::End,
            FormField::End => FormField::Apply,
            FormField::Apply => FormField::Clear,
            FormField::Clear => FormField::Start,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Start => FormField::Clear,
            FormField::End => FormField::Start,
            FormField::Apply => FormField::End,
            FormField::Clear => FormField::Apply,
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::Start | FormField::End)
    }
}

/// Message from the form to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub start: String,
    pub end: String,
}

/// Longest accepted input (an RFC 3339 timestamp).
const MAX_INPUT: usize = 25;

#[derive(Debug, Clone, Default)]
pub struct FilterForm {
    pub start: String,
    pub end: String,
    pub focus: FormField,
}

impl FilterForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn active_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Start => Some(&mut self.start),
            FormField::End => Some(&mut self.end),
            FormField::Apply | FormField::Clear => None,
        }
    }

    /// Type a character into the focused text field. Only date characters
    /// are accepted.
    /// Characters that can appear in `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub fn accepts(c: char) -> bool {
        c.is_ascii_digit() || matches!(c, '-' | ':' | 'T' | 'Z' | '+')
    }

    pub fn input_char(&mut self, c: char) {
        if !Self::accepts(c) {
            return;
        }
        if let Some(field) = self.active_text() {
            if field.len() < MAX_INPUT {
                field.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.active_text() {
            field.pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Emit the current pair as-is.
    pub fn submit(&self) -> FilterRequest {
        FilterRequest {
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }

    /// Reset both fields and emit the "no filter" request.
    pub fn clear(&mut self) -> FilterRequest {
        self.start.clear();
        self.end.clear();
        FilterRequest {
            start: String::new(),
            end: String::new(),
        }
    }

    /// Enter on the focused item: Clear clears, everything else submits.
    pub fn activate(&mut self) -> FilterRequest {
        match self.focus {
            FormField::Clear => self.clear(),
            FormField::Start | FormField::End | FormField::Apply => self.submit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(form: &mut FilterForm, s: &str) {
        for c in s.chars() {
            form.input_char(c);
        }
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut f = FormField::Start;
        for _ in 0..4 {
            f = f.next();
        }
        assert_eq!(f, FormField::Start);
        assert_eq!(FormField::Start.prev(), FormField::Clear);
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = FilterForm::new();
        typed(&mut form, "2020-02-01");
        form.focus_next();
        typed(&mut form, "2020-04-01");
        assert_eq!(form.start, "2020-02-01");
        assert_eq!(form.end, "2020-04-01");

        form.backspace();
        assert_eq!(form.end, "2020-04-0");
    }

    #[test]
    fn buttons_ignore_typing_and_letters_are_dropped() {
        let mut form = FilterForm::new();
        typed(&mut form, "20a20");
        assert_eq!(form.start, "2020");
        form.focus = FormField::Apply;
        typed(&mut form, "11");
        form.backspace();
        assert_eq!(form.start, "2020");
        assert!(form.end.is_empty());
    }

    #[test]
    fn submit_does_not_validate() {
        let mut form = FilterForm::new();
        typed(&mut form, "2020-05-01");
        form.focus_next();
        typed(&mut form, "2020-01-01");
        assert_eq!(
            form.submit(),
            FilterRequest {
                start: "2020-05-01".into(),
                end: "2020-01-01".into()
            }
        );
    }

    #[test]
    fn clear_resets_fields_and_emits_empty_request() {
        let mut form = FilterForm::new();
        typed(&mut form, "2020-05-01");
        form.focus = FormField::Clear;
        let req = form.activate();
        assert_eq!(req, FilterRequest { start: String::new(), end: String::new() });
        assert!(form.start.is_empty() && form.end.is_empty());
    }

    #[test]
    fn input_is_capped() {
        let mut form = FilterForm::new();
        typed(&mut form, &"1".repeat(40));
        assert_eq!(form.start.len(), MAX_INPUT);
    }

    proptest::proptest! {
        #[test]
        fn fields_only_ever_hold_date_characters(input in ".{0,60}") {
            let mut form = FilterForm::new();
            typed(&mut form, &input);
            proptest::prop_assert!(form.start.len() <= MAX_INPUT);
            proptest::prop_assert!(form
                .start
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '-' | ':' | 'T' | 'Z' | '+')));
        }
    }
}
