mod result_record;
