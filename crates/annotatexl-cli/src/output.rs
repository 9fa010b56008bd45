use annotatexl_core::annotator::MatchRecord;
use annotatexl_core::fragment::FragmentIon;
use annotatexl_core::spectrum::SpectrumView;

use crate::Runner;

impl Runner {
    pub fn serialize_record(&self, record: &MatchRecord) -> csv::ByteRecord {
        let mut row = csv::ByteRecord::new();
        let matched: &[u8] = if record.is_match() { b"true" } else { b"false" };
        row.push_field(matched);
        row.push_field(
            record
                .category()
                .map(|category| category.as_str())
                .unwrap_or_default()
                .as_bytes(),
        );
        row.push_field(record.label().unwrap_or_default().as_bytes());
        row.push_field(ryu::Buffer::new().format(record.observed.mz).as_bytes());
        row.push_field(ryu::Buffer::new().format(record.observed.intensity).as_bytes());
        match record.error {
            Some(error) => row.push_field(ryu::Buffer::new().format(error).as_bytes()),
            None => row.push_field(b""),
        }
        row
    }

    pub fn write_annotations(&self, records: &[MatchRecord]) -> anyhow::Result<String> {
        let path = self.make_path(format!("{}_annotatexl.csv", self.crosslink));

        let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
        let headers = csv::ByteRecord::from(vec![
            "matched",
            "ion_type",
            "roepstorff",
            "mz",
            "intensity",
            "error",
        ]);

        wtr.write_byte_record(&headers)?;
        for record in records {
            wtr.write_byte_record(&self.serialize_record(record))?;
        }

        wtr.flush()?;
        let bytes = wtr.into_inner()?;
        std::fs::write(&path, bytes)?;
        Ok(path.display().to_string())
    }

    pub fn write_spectrum(&self, records: &[MatchRecord]) -> anyhow::Result<String> {
        let path = self.make_path(format!("{}.spectrum.json", self.crosslink));
        let view = SpectrumView::new(records);
        let bytes = serde_json::to_vec_pretty(&view)?;
        std::fs::write(&path, bytes)?;
        Ok(path.display().to_string())
    }

    pub fn serialize_fragment(&self, fragment: &FragmentIon) -> csv::ByteRecord {
        let mut row = csv::ByteRecord::new();
        row.push_field(fragment.category().as_str().as_bytes());
        row.push_field(fragment.family().as_str().as_bytes());
        row.push_field(fragment.label().as_bytes());
        row.push_field(fragment.sequence().as_bytes());
        row.push_field(ryu::Buffer::new().format(fragment.mass()).as_bytes());
        row
    }

    pub fn write_fragments(&self, fragments: &[FragmentIon]) -> anyhow::Result<String> {
        let path = self.make_path(format!("{}_fragments.csv", self.crosslink));

        let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
        let headers = csv::ByteRecord::from(vec![
            "ion_type",
            "family",
            "roepstorff",
            "sequence",
            "mass",
        ]);

        wtr.write_byte_record(&headers)?;
        for fragment in fragments {
            wtr.write_byte_record(&self.serialize_fragment(fragment))?;
        }

        wtr.flush()?;
        let bytes = wtr.into_inner()?;
        std::fs::write(&path, bytes)?;
        Ok(path.display().to_string())
    }
}
