//! Course tools API proxy.

use std::collections::BTreeSet;

use serde_json::{json, Value};

use crate::types::{Result, UpstreamConfig};

use super::client::ApiClient;
use super::NO_QUERY;

#[derive(Debug, Clone)]
pub struct CoursesApi {
    client: ApiClient,
}

impl CoursesApi {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(&config.courses_base_url, config)?,
        })
    }

    pub async fn get_course(&self, course_id: &str) -> Result<Value> {
        self.client.get_json(&["course", course_id], NO_QUERY).await
    }

    /// `GET /courses`, repeating `courseID` once per id.
    pub async fn get_courses(&self, course_ids: &[String], schedules: bool) -> Result<Value> {
        let mut query: Vec<(&str, &str)> = course_ids
            .iter()
            .map(|id| ("courseID", id.as_str()))
            .collect();
        if schedules {
            query.push(("schedules", "true"));
        }
        self.client.get_json(&["courses"], &query).await
    }

    pub async fn post_courses(&self, user_token: &str, course_ids: &[String]) -> Result<Value> {
        let mut body = json!({ "token": user_token });
        if !course_ids.is_empty() {
            body["courseID"] = json!(course_ids);
        }
        self.client.post_json(&["courses"], &body).await
    }

    pub async fn get_all_courses(&self) -> Result<Value> {
        self.client.get_json(&["courses", "all"], NO_QUERY).await
    }

    pub async fn get_requisites(&self, course_id: &str) -> Result<Value> {
        self.client
            .get_json(&["courses", "requisites", course_id], NO_QUERY)
            .await
    }

    pub async fn search_courses(&self, query: &str) -> Result<Value> {
        self.client
            .get_json(&["courses", "search", ""], &[("query", query)])
            .await
    }

    pub async fn post_search_courses(&self, user_token: &str, query: &str) -> Result<Value> {
        self.client
            .post_json(
                &["courses", "search", ""],
                &json!({ "token": user_token, "query": query }),
            )
            .await
    }

    pub async fn get_instructors(&self) -> Result<Value> {
        self.client.get_json(&["instructors"], NO_QUERY).await
    }

    pub async fn get_schedules(&self) -> Result<Value> {
        self.client.get_json(&["schedules"], NO_QUERY).await
    }

    /// Distinct instructor names across a course's schedules, sorted.
    pub async fn instructors_for_course(&self, course_id: &str) -> Result<Vec<String>> {
        let courses = self.get_courses(&[course_id.to_string()], true).await?;
        Ok(collect_instructors(&courses))
    }

    /// Schedules of the first matching course, or an empty list.
    pub async fn schedules_for_course(&self, course_id: &str) -> Result<Value> {
        let courses = self.get_courses(&[course_id.to_string()], true).await?;
        Ok(first_course_schedules(&courses))
    }
}

fn collect_instructors(courses: &Value) -> Vec<String> {
    let names: BTreeSet<String> = courses
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|course| course.get("schedules").and_then(|s| s.as_array()))
        .flatten()
        .filter_map(|sched| sched.get("instructor").and_then(|i| i.as_str()))
        .map(str::to_string)
        .collect();
    names.into_iter().collect()
}

fn first_course_schedules(courses: &Value) -> Value {
    courses
        .as_array()
        .and_then(|list| list.first())
        .and_then(|course| course.get("schedules"))
        .cloned()
        .unwrap_or_else(|| json!([]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_instructors_dedupes_and_sorts() {
        let courses = json!([
            {"courseID": "15-122", "schedules": [
                {"instructor": "Kaynar"},
                {"instructor": "Cervesato"},
                {"instructor": "Kaynar"},
                {"lecture": "A"},
            ]},
            {"courseID": "15-122", "schedules": [{"instructor": "Anderson"}]},
        ]);
        assert_eq!(
            collect_instructors(&courses),
            vec!["Anderson", "Cervesato", "Kaynar"]
        );
    }

    #[test]
    fn test_collect_instructors_non_list() {
        assert!(collect_instructors(&json!({"error": "nope"})).is_empty());
    }

    #[test]
    fn test_first_course_schedules() {
        let courses = json!([{"schedules": [{"semester": "F"}]}, {"schedules": []}]);
        assert_eq!(first_course_schedules(&courses), json!([{"semester": "F"}]));
        assert_eq!(first_course_schedules(&json!([])), json!([]));
        assert_eq!(first_course_schedules(&json!([{"name": "x"}])), json!([]));
    }
}
