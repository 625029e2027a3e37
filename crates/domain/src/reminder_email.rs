use crate::notification::NotificationWindow;
use crate::work::WorkItem;

/// Rendered subject and HTML body of a due-work reminder. Pure data, the
/// mail transport decides how it goes on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEmail {
    pub subject: String,
    pub html_body: String,
}

impl ReminderEmail {
    pub fn for_work(item: &WorkItem, window: NotificationWindow) -> Self {
        let badge = match window {
            NotificationWindow::OneDay => "🚨 Due tomorrow",
            NotificationWindow::ThreeDays => "⏰ Due in 3 days",
        };
        let description = match &item.description {
            Some(desc) if !desc.is_empty() => {
                format!("<p><strong>📋 Description:</strong> {}</p>", desc)
            }
            _ => String::new(),
        };

        let subject = format!("🔔 Reminder: {} - {}", item.subject, item.label);
        let html_body = format!(
            r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #333;">
  <div style="max-width: 600px; margin: 20px auto; background: white;">
    <div style="background: #2E5BFF; color: white; padding: 20px; text-align: center;">
      <h2>📚 Classmate reminder</h2>
    </div>
    <div style="padding: 20px;">
      <div style="text-align: center;">
        <span style="padding: 10px 20px; background: #ff3b30; color: white; border-radius: 20px; font-weight: bold;">{badge}</span>
      </div>
      <div style="background: #f9f9f9; padding: 20px; margin: 20px 0; border-left: 4px solid #2E5BFF;">
        <p><strong>📚 Subject:</strong> {subject}</p>
        <p><strong>📝 Type:</strong> {label}</p>
        <p><strong>📅 Date:</strong> {date}</p>
        {description}
      </div>
      <p style="text-align: center;">Don't forget to prepare! 💪</p>
    </div>
    <div style="border-top: 1px solid #ddd; text-align: center; color: #777; font-size: 12px;">
      <p>This is an automated reminder from Classmate.</p>
      <p><small>To unsubscribe, visit your notification settings.</small></p>
    </div>
  </div>
</body>
</html>"#,
            badge = badge,
            subject = item.subject,
            label = item.label,
            date = item.effective_date_str(),
            description = description,
        );

        Self { subject, html_body }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::work::WorkKind;

    fn item() -> WorkItem {
        WorkItem {
            id: 42,
            kind: WorkKind::GradedWork,
            subject: "Math".into(),
            date: "2025-01-10".into(),
            due_date: Some("2025-01-11".into()),
            label: "Exam".into(),
            description: Some("Chapters 1-3".into()),
        }
    }

    #[test]
    fn subject_names_the_work() {
        let email = ReminderEmail::for_work(&item(), NotificationWindow::OneDay);
        assert!(email.subject.contains("Math"));
        assert!(email.subject.contains("Exam"));
    }

    #[test]
    fn body_uses_effective_date_and_window_badge() {
        let email = ReminderEmail::for_work(&item(), NotificationWindow::OneDay);
        assert!(email.html_body.contains("2025-01-11"));
        assert!(email.html_body.contains("Due tomorrow"));

        let email = ReminderEmail::for_work(&item(), NotificationWindow::ThreeDays);
        assert!(email.html_body.contains("Due in 3 days"));
    }

    #[test]
    fn body_omits_empty_description() {
        let mut bare = item();
        bare.description = None;
        let email = ReminderEmail::for_work(&bare, NotificationWindow::OneDay);
        assert!(!email.html_body.contains("Description"));
    }
}
