use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use navicula::Effect;

use crate::environment::model::RemovePostsRequest;
use crate::environment::Environment;
use crate::helper::{datetime_input_value, parse_datetime_input};
use crate::loc;

pub type ViewStore<'a> = navicula::ViewStore<'a, super::RemovePostsReducer>;

#[derive(Clone, Debug)]
pub enum RemovePostsAction {
    StartChanged(String),
    EndChanged(String),
    Remove,
    Removed(Result<i64, String>),
    ClearError,
}

/// Bulk deletion of every post inside a time range. The range is entered
/// as `datetime-local` values in the user's timezone.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemovePostsState {
    pub start_time: String,
    pub end_time: String,
    pub is_removing: bool,
    /// Shown once a removal finished
    pub removed: Option<i64>,
    pub error: Option<String>,
}

impl RemovePostsState {
    /// The whole of `today`
    pub fn new(today: NaiveDate) -> Self {
        let start = today.and_time(NaiveTime::MIN);
        let end = today.and_hms_opt(23, 59, 0).unwrap_or(start);
        Self {
            start_time: datetime_input_value(start),
            end_time: datetime_input_value(end),
            is_removing: false,
            removed: None,
            error: None,
        }
    }

    /// The range to delete, or the message explaining why it is invalid
    pub fn request<Tz: TimeZone>(&self, tz: &Tz) -> Result<RemovePostsRequest, String> {
        let start_time = to_millis(&self.start_time, tz)?;
        let end_time = to_millis(&self.end_time, tz)?;
        if start_time >= end_time {
            return Err(loc!("Start time must be before end time").to_string());
        }
        Ok(RemovePostsRequest {
            start_time,
            end_time,
        })
    }

    /// The range to send. `None` while a removal runs, or when the range is
    /// invalid, which is reported in `error`.
    pub fn begin_remove<Tz: TimeZone>(&mut self, tz: &Tz) -> Option<RemovePostsRequest> {
        if self.is_removing {
            return None;
        }
        match self.request(tz) {
            Ok(request) => {
                self.is_removing = true;
                self.error = None;
                Some(request)
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    pub fn finish_remove(&mut self, result: Result<i64, String>) {
        self.is_removing = false;
        match result {
            Ok(count) => self.removed = Some(count),
            Err(e) => self.error = Some(e),
        }
    }

    pub fn result_text(&self) -> Option<String> {
        self.removed
            .map(|count| format!("{} {count}", loc!("Posts removed:")))
    }
}

fn to_millis<Tz: TimeZone>(value: &str, tz: &Tz) -> Result<i64, String> {
    parse_datetime_input(value)
        .and_then(|dt| tz.from_local_datetime(&dt).earliest())
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| format!("{} {value}", loc!("Invalid time:")))
}

pub fn reduce<'a>(
    _context: &'a impl navicula::types::MessageContext<RemovePostsAction, (), ()>,
    action: RemovePostsAction,
    state: &'a mut RemovePostsState,
    environment: &'a Environment,
) -> Effect<'static, RemovePostsAction> {
    log::trace!("{action:?}");
    match action {
        RemovePostsAction::StartChanged(value) => state.start_time = value,
        RemovePostsAction::EndChanged(value) => state.end_time = value,
        RemovePostsAction::Remove => {
            let Some(request) = state.begin_remove(&Local) else {
                return Effect::NONE;
            };
            let model = environment.model.clone();
            return Effect::future(
                async move { model.admin_remove_posts_between(request).await },
                RemovePostsAction::Removed,
            );
        }
        RemovePostsAction::Removed(result) => state.finish_remove(result),
        RemovePostsAction::ClearError => state.error = None,
    }
    Effect::NONE
}
