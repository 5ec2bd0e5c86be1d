pub mod document_id;
