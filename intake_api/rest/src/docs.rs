use aide::{
    gen::in_context,
    openapi::{Info, OpenApi, ReferenceOr, Response, Responses},
    transform::{TransformOperation, TransformResponse},
    OperationOutput,
};
use axum::{http::StatusCode, response::IntoResponse, routing, Json, Router};
use intake_utils::intake_version;
use schemars::{
    schema::{Metadata, Schema, SchemaObject, SubschemaValidation},
    JsonSchema,
};

mod redoc;

pub fn openapi() -> OpenApi {
    OpenApi {
        info: Info {
            title: "Submission Intake".into(),
            description: Some("Accepts form submissions and queues them for processing.".into()),
            version: intake_version().into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn router(api: OpenApi) -> Router<()> {
    let api = std::sync::Arc::new(api);
    Router::new()
        .route(
            "/openapi.json",
            routing::get(move || async move { Json(&*api).into_response() }),
        )
        .merge(redoc::router())
}

/// Extension trait for [`TransformOperation`]
pub trait TransformOperationExt {
    /// Add a [`Json`] response to the operation.
    ///
    /// Responses sharing a status code are combined into one `anyOf` schema.
    fn add_response<R: JsonSchema>(
        self,
        code: StatusCode,
        description: impl Into<Option<&'static str>>,
    ) -> Self
    where
        Self: Sized,
    {
        self.add_response_with::<R>(code, description, |op| op)
    }

    /// Like [`TransformOperationExt::add_response`], with a transform applied
    /// to the response before it is added.
    fn add_response_with<R: JsonSchema>(
        self,
        code: StatusCode,
        description: impl Into<Option<&'static str>>,
        transform: impl FnOnce(TransformResponse<R>) -> TransformResponse<R>,
    ) -> Self;
}

impl TransformOperationExt for TransformOperation<'_> {
    fn add_response_with<R: JsonSchema>(
        mut self,
        code: StatusCode,
        description: impl Into<Option<&'static str>>,
        transform: impl FnOnce(TransformResponse<R>) -> TransformResponse<R>,
    ) -> Self {
        let Some(mut response) =
            in_context(|ctx| Json::<R>::operation_response(ctx, &mut Default::default()))
        else {
            return self;
        };
        if let Some(description) = description.into() {
            response.description = description.into();
        }
        let _ = transform(TransformResponse::new(&mut response));

        let operation = self.inner_mut();
        let responses = operation.responses.get_or_insert_with(Default::default);
        merge_response(code, response, responses);

        self
    }
}

fn merge_response(code: StatusCode, src: Response, dst: &mut Responses) {
    let code = aide::openapi::StatusCode::Code(code.as_u16());

    let Some(ReferenceOr::Item(dst)) = dst.responses.get_mut(&code) else {
        dst.responses.insert(code, ReferenceOr::Item(src));
        return;
    };

    for (media_type_name, src_media_type) in src.content {
        let dst_media_type = dst.content.entry(media_type_name).or_default();
        let Some(existing) = dst_media_type.schema.take() else {
            dst_media_type.schema = src_media_type.schema;
            continue;
        };

        let existing = existing.json_schema.into_object();
        let any_of = existing
            .subschemas
            .as_ref()
            .and_then(|s| s.any_of.clone())
            .filter(|s| !s.is_empty());
        let mut schemas = match any_of {
            Some(schemas) => schemas,
            None => vec![titled(existing, dst.description.clone())],
        };

        if let Some(schema) = src_media_type.schema {
            let schema = titled(schema.json_schema.into_object(), src.description.clone());
            if !schemas.contains(&schema) {
                schemas.push(schema);
            }
        }

        let titles = schemas
            .iter()
            .filter_map(|schema| match schema {
                Schema::Object(obj) => obj.metadata.as_ref()?.title.as_deref(),
                Schema::Bool(_) => None,
            })
            .collect::<Vec<_>>();
        dst.description = match titles.as_slice() {
            [title] => (*title).into(),
            titles => titles.iter().fold(
                "There are multiple possible responses with this status code:".to_owned(),
                |acc, title| format!("{acc}\n- {title}"),
            ),
        };

        dst_media_type.schema = Some(aide::openapi::SchemaObject {
            json_schema: SchemaObject {
                subschemas: Some(
                    SubschemaValidation {
                        any_of: Some(schemas),
                        ..Default::default()
                    }
                    .into(),
                ),
                ..Default::default()
            }
            .into(),
            external_docs: None,
            example: None,
        });
    }
}

fn titled(schema: SchemaObject, title: String) -> Schema {
    SchemaObject {
        metadata: Some(
            Metadata {
                title: Some(title),
                ..Default::default()
            }
            .into(),
        ),
        ..schema
    }
    .into()
}
