/// Arrow schema and conversion for tabular incident views.
pub mod incidents {
    use std::sync::Arc;

    use arrow::array::{
        ArrayRef, Float64Array, StringArray, TimestampMillisecondArray, UInt8Array,
    };
    use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
    use arrow::error::ArrowError;
    use arrow::record_batch::RecordBatch;

    use crate::model::Incident;

    /// Columns shown by the incident table, in display order.
    pub const TABLE_COLUMNS: &[&str] = &[
        "id",
        "type",
        "severity",
        "status",
        "department",
        "reported_at",
    ];

    /// Schema for one row per incident.
    pub fn incident_schema() -> Schema {
        Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("type", DataType::Utf8, false),
            Field::new("severity", DataType::Utf8, false),
            Field::new("status", DataType::Utf8, false),
            Field::new("department", DataType::Utf8, false),
            Field::new(
                "reported_at",
                DataType::Timestamp(TimeUnit::Millisecond, Some("UTC".into())),
                false,
            ),
            Field::new("address", DataType::Utf8, false),
            Field::new("lat", DataType::Float64, false),
            Field::new("lng", DataType::Float64, false),
            Field::new("reporter", DataType::Utf8, false),
            Field::new("credibility", DataType::UInt8, false),
            Field::new("media_url", DataType::Utf8, true),
        ])
    }

    /// Build a single RecordBatch holding `incidents` in list order.
    pub fn to_record_batch(incidents: &[Incident]) -> Result<RecordBatch, ArrowError> {
        let schema: SchemaRef = Arc::new(incident_schema());

        let text = |f: fn(&Incident) -> String| -> ArrayRef {
            Arc::new(StringArray::from(incidents.iter().map(f).collect::<Vec<_>>()))
        };

        let columns: Vec<ArrayRef> = vec![
            text(|i| i.id.to_string()),
            text(|i| i.kind.clone()),
            text(|i| i.severity.to_string()),
            text(|i| i.status.to_string()),
            text(|i| i.department.to_string()),
            Arc::new(
                TimestampMillisecondArray::from(
                    incidents
                        .iter()
                        .map(|i| i.reported_at.timestamp_millis())
                        .collect::<Vec<_>>(),
                )
                .with_timezone("UTC"),
            ),
            text(|i| i.location.address.clone()),
            Arc::new(Float64Array::from(
                incidents.iter().map(|i| i.location.lat).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                incidents.iter().map(|i| i.location.lng).collect::<Vec<_>>(),
            )),
            text(|i| i.reporter.name.clone()),
            Arc::new(UInt8Array::from(
                incidents
                    .iter()
                    .map(|i| i.reporter.credibility)
                    .collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                incidents
                    .iter()
                    .map(|i| i.media.as_ref().map(|m| m.url.clone()))
                    .collect::<Vec<_>>(),
            )),
        ];

        RecordBatch::try_new(schema, columns)
    }

    /// Project a batch down to [`TABLE_COLUMNS`].
    pub fn table_view(batch: &RecordBatch) -> Result<RecordBatch, ArrowError> {
        let schema = batch.schema();
        let indices = TABLE_COLUMNS
            .iter()
            .map(|name| schema.index_of(name))
            .collect::<Result<Vec<_>, _>>()?;
        batch.project(&indices)
    }
}

#[cfg(test)]
mod tests {
    use super::incidents;
    use crate::mock;
    use arrow::array::{Array, StringArray};

    #[test]
    fn incident_schema_has_expected_fields() {
        let schema = incidents::incident_schema();
        assert_eq!(schema.fields().len(), 12);
        assert!(schema.field_with_name("reported_at").is_ok());
        assert!(schema.field_with_name("media_url").unwrap().is_nullable());
    }

    #[test]
    fn batch_preserves_row_order() {
        let list = mock::generate(25);
        let batch = incidents::to_record_batch(&list).unwrap();
        assert_eq!(batch.num_rows(), 25);

        let ids = batch
            .column_by_name("id")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        for (row, incident) in list.iter().enumerate() {
            assert_eq!(ids.value(row), incident.id.to_string());
        }

        let media = batch.column_by_name("media_url").unwrap();
        let without_media = list.iter().filter(|i| i.media.is_none()).count();
        assert_eq!(media.null_count(), without_media);
    }

    #[test]
    fn empty_list_gives_empty_batch() {
        let batch = incidents::to_record_batch(&[]).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 12);
    }

    #[test]
    fn table_view_projects_display_columns() {
        let batch = incidents::to_record_batch(&mock::generate(3)).unwrap();
        let view = incidents::table_view(&batch).unwrap();
        let names: Vec<_> = view
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, incidents::TABLE_COLUMNS);
    }
}
