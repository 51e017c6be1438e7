//! Course tools — a pass-through proxy over the course tools API.

use serde_json::{json, Value};

use super::{
    bool_arg, failed, str_arg, string_list_arg, ParamDef, ParamType, ToolEntry, ToolOutput,
    ToolService,
};
use crate::types::{Error, Result};
use crate::upstream::CoursesApi;

/// Course lookup tools, mounted under `courses`.
#[derive(Debug, Clone)]
pub struct CoursesTools {
    api: CoursesApi,
}

impl CoursesTools {
    pub fn new(api: CoursesApi) -> Self {
        Self { api }
    }
}

fn course_id() -> ParamDef {
    ParamDef::required("course_id", ParamType::String, "Course number, e.g. '15-122'")
}

fn user_token() -> ParamDef {
    ParamDef::required("user_token", ParamType::String, "Authenticated user token")
}

fn course_ids() -> ParamDef {
    ParamDef::with_default(
        "course_ids",
        ParamType::Optional(Box::new(ParamType::StringList)),
        "Course numbers to fetch",
        Value::Null,
    )
}

fn search_query() -> ParamDef {
    ParamDef::required("query", ParamType::String, "Free-text course search")
}

#[async_trait::async_trait]
impl ToolService for CoursesTools {
    fn prefix(&self) -> &'static str {
        "courses"
    }

    fn entries(&self) -> Vec<ToolEntry> {
        vec![
            ToolEntry::new("get_course", "Get one course by number.", vec![course_id()]),
            ToolEntry::new(
                "get_courses",
                "Get several courses, optionally with their schedules.",
                vec![
                    course_ids(),
                    ParamDef::with_default(
                        "schedules",
                        ParamType::Bool,
                        "Include schedules",
                        json!(false),
                    ),
                ],
            ),
            ToolEntry::new(
                "post_courses",
                "Get courses as an authenticated user.",
                vec![user_token(), course_ids()],
            ),
            ToolEntry::new("get_all_courses", "Get every course.", vec![]),
            ToolEntry::new(
                "get_requisites",
                "Get the prerequisites and corequisites of a course.",
                vec![course_id()],
            ),
            ToolEntry::new("search_courses", "Search courses.", vec![search_query()]),
            ToolEntry::new(
                "post_search_courses",
                "Search courses as an authenticated user.",
                vec![user_token(), search_query()],
            ),
            ToolEntry::new("get_instructors", "Get all instructors.", vec![]),
            ToolEntry::new("get_schedules", "Get all schedules.", vec![]),
            ToolEntry::new(
                "get_instructors_for_course",
                "Get the distinct instructors teaching a course.",
                vec![course_id()],
            ),
            ToolEntry::new(
                "get_schedules_for_course",
                "Get the schedules of a course.",
                vec![course_id()],
            ),
            ToolEntry::new("list_tools", "List the course tools.", vec![]),
        ]
    }

    async fn call(&self, method: &str, args: &Value) -> Result<ToolOutput> {
        let api = &self.api;
        let result = match method {
            "get_course" => api.get_course(str_arg(args, "course_id")?).await,
            "get_courses" => {
                api.get_courses(&string_list_arg(args, "course_ids"), bool_arg(args, "schedules"))
                    .await
            }
            "post_courses" => {
                api.post_courses(str_arg(args, "user_token")?, &string_list_arg(args, "course_ids"))
                    .await
            }
            "get_all_courses" => api.get_all_courses().await,
            "get_requisites" => api.get_requisites(str_arg(args, "course_id")?).await,
            "search_courses" => api.search_courses(str_arg(args, "query")?).await,
            "post_search_courses" => {
                api.post_search_courses(str_arg(args, "user_token")?, str_arg(args, "query")?)
                    .await
            }
            "get_instructors" => api.get_instructors().await,
            "get_schedules" => api.get_schedules().await,
            "get_instructors_for_course" => api
                .instructors_for_course(str_arg(args, "course_id")?)
                .await
                .map(|names| json!(names)),
            "get_schedules_for_course" => api.schedules_for_course(str_arg(args, "course_id")?).await,
            "list_tools" => {
                let names: Vec<String> = self
                    .entries()
                    .iter()
                    .map(|e| format!("{}_{}", self.prefix(), e.id))
                    .collect();
                Ok(json!(names))
            }
            _ => return Err(Error::not_found(format!("Unknown courses method: {}", method))),
        };

        result
            .map(ToolOutput::Json)
            .map_err(|e| failed(&method.replace('_', " "), e))
    }
}
